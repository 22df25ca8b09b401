//! # Command Line
//!
//! Parses `stockroom <command> ...` and runs it against the app state.
//!
//! ```text
//! stockroom list [--json]
//! stockroom show <id>
//! stockroom add <name> <price> <qty> <supplier> <phone>
//! stockroom edit <id> <name> <price> <qty> <supplier> <phone>
//! stockroom sell <id>
//! stockroom delete <id>
//! stockroom delete-all
//! ```

use thiserror::Error;
use tracing::debug;

use crate::commands::{
    delete_all_products, delete_product, get_product, list_products, save_product, sell_one,
    EditMode, ProductDto, ProductForm, SaleOutcome, SaveOutcome,
};
use crate::error::{ApiError, ErrorCode};
use crate::state::{AppConfig, AppState};

/// Usage text printed for `help` and on parse errors.
pub const USAGE: &str = "\
Usage: stockroom <COMMAND>

Commands:
  list [--json]                                   List all products
  show <id>                                       Show one product
  add <name> <price> <qty> <supplier> <phone>     Add a product
  edit <id> <name> <price> <qty> <supplier> <phone>
                                                  Replace a product's fields
  sell <id>                                       Sell one unit
  delete <id>                                     Delete one product
  delete-all                                      Delete every product
  help                                            Show this help message

Environment:
  STOCKROOM_DB_PATH              Database file
  STOCKROOM_CURRENCY_SYMBOL      Currency symbol for prices
  STOCKROOM_CURRENCY_DECIMALS    Decimal places prices are stored with
  RUST_LOG                       Log filter";

/// Command line parse errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("No command given")]
    MissingCommand,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected} argument(s), got {got}")]
    WrongArgumentCount {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("'{0}' is not a valid product id")]
    InvalidId(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

/// One parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { json: bool },
    Show { id: i64 },
    Add(ProductForm),
    Edit { id: i64, form: ProductForm },
    Sell { id: i64 },
    Delete { id: i64 },
    DeleteAll,
    Help,
}

impl Command {
    /// Parses arguments (without the program name).
    pub fn parse(args: &[String]) -> Result<Command, CliError> {
        let (name, rest) = args.split_first().ok_or(CliError::MissingCommand)?;

        let command = match name.as_str() {
            "list" => match rest {
                [] => Command::List { json: false },
                [flag] if flag == "--json" => Command::List { json: true },
                [other] => return Err(CliError::UnknownOption(other.clone())),
                _ => return Err(wrong_count(name, 1, rest.len())),
            },
            "show" => Command::Show {
                id: single_id(name, rest)?,
            },
            "add" => Command::Add(form_from(name, rest)?),
            "edit" => {
                let (id, fields) = rest
                    .split_first()
                    .ok_or_else(|| wrong_count(name, 6, 0))?;
                Command::Edit {
                    id: parse_id(id)?,
                    form: form_from(name, fields).map_err(|_| wrong_count(name, 6, rest.len()))?,
                }
            }
            "sell" => Command::Sell {
                id: single_id(name, rest)?,
            },
            "delete" => Command::Delete {
                id: single_id(name, rest)?,
            },
            "delete-all" => {
                if !rest.is_empty() {
                    return Err(wrong_count(name, 0, rest.len()));
                }
                Command::DeleteAll
            }
            "help" | "--help" | "-h" => Command::Help,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };

        debug!(?command, "Parsed command");
        Ok(command)
    }

    /// Runs the command and returns the text to print.
    pub async fn execute(&self, state: &AppState) -> Result<String, ApiError> {
        let gateway = state.gateway();
        let config = state.config();

        match self {
            Command::List { json } => {
                let products = list_products(gateway).await?;
                if *json {
                    return serde_json::to_string_pretty(&products)
                        .map_err(|e| ApiError::internal(e.to_string()));
                }
                if products.is_empty() {
                    return Ok("No products.".to_string());
                }
                Ok(products
                    .iter()
                    .map(|p| format_row(config, p))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::Show { id } => {
                let product = get_product(gateway, *id).await?;
                Ok(format_detail(config, &product))
            }
            Command::Add(form) => match save_product(gateway, EditMode::Create, form).await? {
                SaveOutcome::Created { id } => Ok(format!("Product saved with id {}", id)),
                SaveOutcome::Skipped => Ok("Nothing to save.".to_string()),
                _ => Err(ApiError::database("Error with saving product")),
            },
            Command::Edit { id, form } => {
                match save_product(gateway, EditMode::EditExisting(*id), form).await? {
                    SaveOutcome::Updated => Ok(format!("Product {} updated", id)),
                    _ => Err(ApiError::database("Error with updating product")),
                }
            }
            Command::Sell { id } => match sell_one(gateway, *id).await? {
                SaleOutcome::Sold { remaining } => {
                    Ok(format!("Sold one of product {}, {} left", id, remaining))
                }
                SaleOutcome::OutOfStock => Err(ApiError::new(
                    ErrorCode::OutOfStock,
                    format!("Product {} is out of stock", id),
                )),
                SaleOutcome::NotFound => Err(ApiError::not_found("Product", id)),
                SaleOutcome::Failed => Err(ApiError::database("Error with updating product")),
            },
            Command::Delete { id } => {
                if delete_product(gateway, *id).await? {
                    Ok(format!("Product {} deleted", id))
                } else {
                    Err(ApiError::not_found("Product", id))
                }
            }
            Command::DeleteAll => {
                let deleted = delete_all_products(gateway).await?;
                Ok(format!("Deleted {} product(s)", deleted))
            }
            Command::Help => Ok(USAGE.to_string()),
        }
    }
}

fn wrong_count(command: &str, expected: usize, got: usize) -> CliError {
    CliError::WrongArgumentCount {
        command: command.to_string(),
        expected,
        got,
    }
}

fn parse_id(raw: &str) -> Result<i64, CliError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CliError::InvalidId(raw.to_string()))
}

fn single_id(command: &str, rest: &[String]) -> Result<i64, CliError> {
    match rest {
        [id] => parse_id(id),
        _ => Err(wrong_count(command, 1, rest.len())),
    }
}

fn form_from(command: &str, fields: &[String]) -> Result<ProductForm, CliError> {
    match fields {
        [name, price, quantity, supplier_name, supplier_phone] => Ok(ProductForm {
            name: name.clone(),
            price: price.clone(),
            quantity: quantity.clone(),
            supplier_name: supplier_name.clone(),
            supplier_phone: supplier_phone.clone(),
        }),
        _ => Err(wrong_count(command, 5, fields.len())),
    }
}

fn format_row(config: &AppConfig, p: &ProductDto) -> String {
    let stock = if p.in_stock {
        format!("{} in stock", p.quantity)
    } else {
        "out of stock".to_string()
    };
    format!(
        "{:>4}  {:<24} {:>10}  {}",
        p.id,
        p.name,
        config.format_currency(p.price),
        stock
    )
}

fn format_detail(config: &AppConfig, p: &ProductDto) -> String {
    format!(
        "Product {}\n  Name:     {}\n  Price:    {}\n  Quantity: {}\n  Supplier: {}\n  Phone:    {}",
        p.id,
        p.name,
        config.format_currency(p.price),
        p.quantity,
        p.supplier_name,
        p.supplier_phone
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_db::{Database, DbConfig};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    async fn state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::with_database(db, AppConfig::default())
    }

    async fn run(state: &AppState, list: &[&str]) -> Result<String, ApiError> {
        Command::parse(&args(list)).unwrap().execute(state).await
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse(&args(&["list", "--json"])).unwrap(),
            Command::List { json: true }
        );
        assert_eq!(
            Command::parse(&args(&["sell", "7"])).unwrap(),
            Command::Sell { id: 7 }
        );
        assert_eq!(
            Command::parse(&args(&["delete-all"])).unwrap(),
            Command::DeleteAll
        );

        let Command::Edit { id, form } =
            Command::parse(&args(&["edit", "3", "Bolt", "35", "10", "Acme", "0047"])).unwrap()
        else {
            panic!("expected edit");
        };
        assert_eq!(id, 3);
        assert_eq!(form.supplier_phone, "0047");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse(&[]), Err(CliError::MissingCommand));
        assert_eq!(
            Command::parse(&args(&["restock"])),
            Err(CliError::UnknownCommand("restock".to_string()))
        );
        assert_eq!(
            Command::parse(&args(&["show", "seven"])),
            Err(CliError::InvalidId("seven".to_string()))
        );
        assert!(matches!(
            Command::parse(&args(&["add", "Bolt", "35"])),
            Err(CliError::WrongArgumentCount { expected: 5, got: 2, .. })
        ));
        assert!(matches!(
            Command::parse(&args(&["edit", "1", "Bolt"])),
            Err(CliError::WrongArgumentCount { expected: 6, got: 2, .. })
        ));
        assert_eq!(
            Command::parse(&args(&["list", "--yaml"])),
            Err(CliError::UnknownOption("--yaml".to_string()))
        );
    }

    #[tokio::test]
    async fn test_add_show_sell_delete() {
        let state = state().await;

        let out = run(&state, &["add", "Bolt", "1250", "1", "Acme", "0047 1234"])
            .await
            .unwrap();
        assert_eq!(out, "Product saved with id 1");

        let out = run(&state, &["show", "1"]).await.unwrap();
        assert!(out.contains("$12.50"));
        assert!(out.contains("0047 1234"));

        let out = run(&state, &["sell", "1"]).await.unwrap();
        assert_eq!(out, "Sold one of product 1, 0 left");

        let err = run(&state, &["sell", "1"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfStock);

        let out = run(&state, &["list"]).await.unwrap();
        assert!(out.contains("out of stock"));

        run(&state, &["delete", "1"]).await.unwrap();
        let err = run(&state, &["delete", "1"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_add_negative_quantity() {
        let state = state().await;
        let err = run(&state, &["add", "Bolt", "10", "-2", "Acme", "0047"])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity cannot be negative");
    }

    #[tokio::test]
    async fn test_edit_and_list_json() {
        let state = state().await;
        run(&state, &["add", "Bolt", "10", "5", "Acme", "0047"])
            .await
            .unwrap();
        run(&state, &["edit", "1", "Hex Bolt", "12", "5", "Acme", "0047"])
            .await
            .unwrap();

        let out = run(&state, &["list", "--json"]).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["name"], "Hex Bolt");
        assert_eq!(json[0]["supplierName"], "Acme");
    }

    #[tokio::test]
    async fn test_delete_all() {
        let state = state().await;
        assert_eq!(run(&state, &["list"]).await.unwrap(), "No products.");
        run(&state, &["add", "A", "1", "1", "S", "P"]).await.unwrap();
        run(&state, &["add", "B", "1", "1", "S", "P"]).await.unwrap();

        let out = run(&state, &["delete-all"]).await.unwrap();
        assert_eq!(out, "Deleted 2 product(s)");
    }
}
