use crate::cli::args::{AssetCommand, CliArgs, Command};
use crate::render::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(page_size) = args.page_size {
        if page_size == 0 {
            return Err("invalid page-size, expected positive integer".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.output.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --output '{raw}': expected table or json"));
        }
    }
    if let Some(endpoint) = args.endpoint.as_deref() {
        if endpoint.trim().is_empty() {
            return Err("invalid --endpoint: expected a URL".to_string());
        }
    }
    match &args.command {
        Command::Asset(AssetCommand::Add(add)) => {
            if add.name.trim().is_empty() {
                return Err("invalid --name: expected a non-empty asset name".to_string());
            }
        }
        Command::Login(login) => {
            if login.email.trim().is_empty() {
                return Err("invalid --em: expected an email address".to_string());
            }
        }
        Command::Report(report) => {
            if report.kind.trim().is_empty() {
                return Err("invalid --tp: expected a report type".to_string());
            }
        }
        _ => {}
    }
    Ok(())
}
