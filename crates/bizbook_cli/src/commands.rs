//! Command parsing and dispatch.
//!
//! # Responsibility
//! - Parse `bizbook [--config PATH] <command> [args]`.
//! - Drive core services and render plain-text output.
//!
//! # Invariants
//! - Commands only touch state through core services.
//! - Output goes to the provided writer so commands are testable.

use bizbook_core::{
    export_file_name, local_today, AggregationService, Amount, Client, Collection, DbError,
    DocumentStore, Employee, InventoryItem, RecordListQuery, RecordService, RepoError, Sale,
    SaleDraft, SettingsStore, SlotStore, StoreError, Task, TaskDraft, Theme, TransferError,
    TransferService,
};
use crate::config::ConfigError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage: bizbook [--config PATH] <command>

commands:
  dashboard                             show dashboard counts
  sales-week                            show sales totals for the last 7 days
  list <collection> [search]            list employees|clients|inventory|tasks|sales
  add-sale <item> <qty> <price> [date]  record a sale (date defaults to today)
  add-task <title> <due> [description]  add a task due on YYYY-MM-DD
  toggle-task <id>                      mark a task done/pending
  delete <collection> <id>              delete a record
  theme [light|dark]                    show or set the theme
  export [path]                         write a JSON backup
  import <path>                         replace all data from a JSON backup
  clear                                 delete all data
  version                               print the version";

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    Store(StoreError),
    Repo(RepoError),
    Transfer(TransferError),
    Io(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "{message}\n\n{USAGE}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Usage(_) | Self::Logging(_) => None,
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Transfer(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TransferError> for CliError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dashboard,
    SalesWeek,
    List {
        collection: Collection,
        search: Option<String>,
    },
    AddSale {
        item: String,
        qty: f64,
        price: Amount,
        date: Option<String>,
    },
    AddTask {
        title: String,
        due_date: String,
        description: Option<String>,
    },
    ToggleTask {
        id: String,
    },
    Delete {
        collection: Collection,
        id: String,
    },
    Theme {
        theme: Option<Theme>,
    },
    Export {
        path: Option<PathBuf>,
    },
    Import {
        path: PathBuf,
    },
    Clear,
    Version,
    Help,
}

impl Command {
    /// Whether the command needs the data store.
    pub fn needs_store(&self) -> bool {
        !matches!(self, Self::Version | Self::Help)
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

pub fn parse_args(args: &[String]) -> Result<Invocation, CliError> {
    let mut config_path = None;
    let mut rest = args;
    while let Some(first) = rest.first() {
        match first.as_str() {
            "--config" => {
                let path = rest
                    .get(1)
                    .ok_or_else(|| usage("--config requires a path"))?;
                config_path = Some(PathBuf::from(path));
                rest = &rest[2..];
            }
            "-h" | "--help" => {
                return Ok(Invocation {
                    config_path,
                    command: Command::Help,
                })
            }
            _ => break,
        }
    }

    Ok(Invocation {
        config_path,
        command: parse_command(rest)?,
    })
}

fn parse_command(args: &[String]) -> Result<Command, CliError> {
    let Some((name, params)) = args.split_first() else {
        return Ok(Command::Help);
    };
    let arg = |index: usize, what: &str| -> Result<String, CliError> {
        params
            .get(index)
            .cloned()
            .ok_or_else(|| usage(&format!("`{name}` requires {what}")))
    };
    let optional = |index: usize| params.get(index).cloned();

    let command = match name.as_str() {
        "dashboard" => Command::Dashboard,
        "sales-week" => Command::SalesWeek,
        "list" => Command::List {
            collection: parse_collection(&arg(0, "a collection")?)?,
            search: optional(1),
        },
        "add-sale" => Command::AddSale {
            item: arg(0, "an item")?,
            qty: arg(1, "a quantity")?
                .trim()
                .parse()
                .map_err(|_| usage("quantity must be a number"))?,
            price: parse_price(&arg(2, "a price")?),
            date: optional(3),
        },
        "add-task" => Command::AddTask {
            title: arg(0, "a title")?,
            due_date: arg(1, "a due date")?,
            description: optional(2),
        },
        "toggle-task" => Command::ToggleTask {
            id: arg(0, "a task id")?,
        },
        "delete" => Command::Delete {
            collection: parse_collection(&arg(0, "a collection")?)?,
            id: arg(1, "a record id")?,
        },
        "theme" => Command::Theme {
            theme: match optional(0) {
                Some(value) => Some(
                    Theme::parse(&value)
                        .ok_or_else(|| usage(&format!("unknown theme `{value}`")))?,
                ),
                None => None,
            },
        },
        "export" => Command::Export {
            path: optional(0).map(PathBuf::from),
        },
        "import" => Command::Import {
            path: PathBuf::from(arg(0, "a file path")?),
        },
        "clear" => Command::Clear,
        "version" => Command::Version,
        "help" => Command::Help,
        other => return Err(usage(&format!("unknown command `{other}`"))),
    };
    Ok(command)
}

fn parse_collection(value: &str) -> Result<Collection, CliError> {
    Collection::parse(value).ok_or_else(|| usage(&format!("unknown collection `{value}`")))
}

// Plain numbers are stored as numbers; anything else is kept verbatim and
// coerced on read, like values typed into the sales form.
fn parse_price(value: &str) -> Amount {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Amount::Number(number),
        _ => Amount::Text(value.to_string()),
    }
}

fn usage(message: &str) -> CliError {
    CliError::Usage(message.to_string())
}

/// Executes `command` against `store`, writing human-readable output.
pub fn run<S: SlotStore>(
    command: Command,
    store: &DocumentStore<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Dashboard => {
            let summary = AggregationService::new(store).dashboard_summary()?;
            writeln!(out, "employees      {}", summary.total_employees)?;
            writeln!(out, "clients        {}", summary.total_clients)?;
            writeln!(out, "inventory      {}", summary.total_inventory)?;
            writeln!(out, "tasks          {}", summary.total_tasks)?;
            writeln!(out, "sales          {}", summary.total_sales)?;
            writeln!(out, "low stock      {}", summary.low_stock)?;
            writeln!(out, "out of stock   {}", summary.out_of_stock)?;
            writeln!(out, "completed      {}", summary.completed_tasks)?;
            writeln!(out, "pending        {}", summary.pending_tasks)?;
            writeln!(out, "overdue        {}", summary.overdue_tasks)?;
        }
        Command::SalesWeek => {
            for entry in AggregationService::new(store).last_7_days_sales_totals()? {
                writeln!(out, "{}  {:.2}", entry.date, entry.total)?;
            }
        }
        Command::List { collection, search } => {
            let query = RecordListQuery { search };
            list(collection, store, &query, out)?;
        }
        Command::AddSale {
            item,
            qty,
            price,
            date,
        } => {
            let sale = RecordService::<_, Sale>::new(store).create(SaleDraft {
                item,
                qty,
                price,
                date,
            })?;
            writeln!(out, "added sale {}", sale.id)?;
        }
        Command::AddTask {
            title,
            due_date,
            description,
        } => {
            let task = RecordService::<_, Task>::new(store).create(TaskDraft {
                title,
                description,
                due_date,
            })?;
            writeln!(out, "added task {}", task.id)?;
        }
        Command::ToggleTask { id } => {
            let task = RecordService::<_, Task>::new(store).toggle_completed(&id)?;
            let state = if task.completed { "completed" } else { "pending" };
            writeln!(out, "task {} marked as {state}", task.id)?;
        }
        Command::Delete { collection, id } => {
            delete(collection, store, &id)?;
            writeln!(out, "deleted {collection} {id}")?;
        }
        Command::Theme { theme } => {
            let settings = SettingsStore::new(store);
            let current = match theme {
                Some(theme) => settings.set_theme(theme)?.theme,
                None => settings.get()?.theme,
            };
            writeln!(out, "theme {}", current.as_str())?;
        }
        Command::Export { path } => {
            let text = TransferService::new(store).export()?;
            let path = path.unwrap_or_else(|| PathBuf::from(export_file_name(local_today())));
            std::fs::write(&path, text)?;
            writeln!(out, "exported to {}", path.display())?;
        }
        Command::Import { path } => {
            let text = std::fs::read_to_string(&path)?;
            let document = TransferService::new(store).import_document(&text)?;
            writeln!(
                out,
                "imported {} employees, {} clients, {} inventory items, {} tasks, {} sales",
                document.employees.len(),
                document.clients.len(),
                document.inventory.len(),
                document.tasks.len(),
                document.sales.len()
            )?;
        }
        Command::Clear => {
            store.clear()?;
            writeln!(out, "all data cleared")?;
        }
        Command::Version => writeln!(out, "bizbook {}", bizbook_core::core_version())?,
        Command::Help => writeln!(out, "{USAGE}")?,
    }
    Ok(())
}

fn list<S: SlotStore>(
    collection: Collection,
    store: &DocumentStore<S>,
    query: &RecordListQuery,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match collection {
        Collection::Employees => {
            for employee in RecordService::<_, Employee>::new(store).list(query)? {
                writeln!(
                    out,
                    "{}  {}  {}  {}  {}",
                    employee.id, employee.name, employee.job_title, employee.email, employee.phone
                )?;
            }
        }
        Collection::Clients => {
            for client in RecordService::<_, Client>::new(store).list(query)? {
                writeln!(
                    out,
                    "{}  {}  {}  {}  {}",
                    client.id, client.name, client.company, client.email, client.phone
                )?;
            }
        }
        Collection::Inventory => {
            for item in RecordService::<_, InventoryItem>::new(store).list(query)? {
                writeln!(
                    out,
                    "{}  {}  {}  {}  {}",
                    item.id,
                    item.item_name,
                    item.category,
                    item.quantity,
                    item.stock_status().label()
                )?;
            }
        }
        Collection::Tasks => {
            let today = local_today();
            for task in RecordService::<_, Task>::new(store).list_by_due_date(query)? {
                let mark = if task.completed { "x" } else { " " };
                let overdue = if task.is_overdue_on(today) {
                    "  overdue"
                } else {
                    ""
                };
                writeln!(
                    out,
                    "[{mark}] {}  {}  due {}{overdue}",
                    task.id, task.title, task.due_date
                )?;
            }
        }
        Collection::Sales => {
            for sale in RecordService::<_, Sale>::new(store).list_recent_first(query)? {
                writeln!(
                    out,
                    "{}  {}  qty {}  price {}  {}",
                    sale.id, sale.item, sale.qty, sale.price, sale.date
                )?;
            }
        }
    }
    Ok(())
}

fn delete<S: SlotStore>(
    collection: Collection,
    store: &DocumentStore<S>,
    id: &str,
) -> Result<(), RepoError> {
    match collection {
        Collection::Employees => RecordService::<_, Employee>::new(store).delete(id),
        Collection::Clients => RecordService::<_, Client>::new(store).delete(id),
        Collection::Inventory => RecordService::<_, InventoryItem>::new(store).delete(id),
        Collection::Tasks => RecordService::<_, Task>::new(store).delete(id),
        Collection::Sales => RecordService::<_, Sale>::new(store).delete(id),
    }
}
