//! One-shot API tester: `olympiad call <module> <action>`.

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use olympiad_core::actions::{Action, Module, build_request, parse_assignment};
use olympiad_core::api::ApiClient;
use olympiad_core::config::Config;
use olympiad_core::outcome::Outcome;

/// Arguments of a single call, as given on the command line.
pub struct CallOptions<'a> {
    pub module: &'a str,
    pub action: &'a str,
    pub id: Option<u64>,
    pub fields: &'a [String],
}

/// Resolves `module`/`action`, validates the fields, sends one request
/// and prints the outcome. Fails when the server reports an error.
pub async fn run(options: &CallOptions<'_>, config: &Config) -> Result<()> {
    let action = resolve_action(options.module, options.action)?;

    let mut values = action.default_values();
    if let Some(id) = options.id {
        let Some(key) = action.id_field() else {
            bail!("'{} {}' does not take an --id", options.module, options.action);
        };
        values.insert(key.to_string(), id.to_string());
    }
    for raw in options.fields {
        let (key, value) = parse_assignment(action, raw)?;
        values.insert(key, value);
    }

    let request = build_request(action, &values)?;
    let client = ApiClient::new(config).context("Failed to create API client")?;

    tracing::info!(%action, "Calling API");
    let result = client.call(&request).await;
    let outcome = Outcome::from_result(action, &result);

    if !outcome.is_success() {
        bail!(
            "{}",
            outcome.message.as_deref().unwrap_or("Request failed")
        );
    }

    if let Some(message) = &outcome.message {
        println!("{message}");
    }
    if let Some(payload) = &outcome.payload {
        let pretty =
            serde_json::to_string_pretty(payload).context("Failed to format response")?;
        println!("{pretty}");
    }
    Ok(())
}

/// Prints every module's actions with their fields.
pub fn list(module: Option<&str>) -> Result<()> {
    let modules = match module {
        Some(name) => vec![resolve_module(name)?],
        None => Module::ALL.to_vec(),
    };

    let mut out = String::new();
    for module in modules {
        writeln!(out, "{} ({})", module.label(), module.cli_name())?;
        for action in module.actions() {
            write!(out, "  {:<10} {}", action.cli_name(), action.label())?;
            let fields: Vec<String> = action
                .fields()
                .iter()
                .map(|f| {
                    if f.required {
                        f.key.to_string()
                    } else {
                        format!("[{}]", f.key)
                    }
                })
                .collect();
            if !fields.is_empty() {
                write!(out, "  ({})", fields.join(", "))?;
            }
            writeln!(out)?;
        }
    }
    print!("{out}");
    Ok(())
}

fn resolve_module(name: &str) -> Result<Module> {
    Module::from_cli_name(name).with_context(|| {
        let known: Vec<&str> = Module::ALL.iter().map(|m| m.cli_name()).collect();
        format!("Unknown module '{name}'. Expected one of: {}", known.join(", "))
    })
}

fn resolve_action(module: &str, action: &str) -> Result<Action> {
    let module = resolve_module(module)?;
    module.find_action(action).with_context(|| {
        let known: Vec<&str> = module.actions().iter().map(|a| a.cli_name()).collect();
        format!(
            "Unknown action '{action}' for {}. Expected one of: {}",
            module.cli_name(),
            known.join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_action() {
        assert_eq!(resolve_action("exams", "list").unwrap(), Action::ListExams);
        assert_eq!(
            resolve_action("questions", "by-topic").unwrap(),
            Action::QuestionsByTopic
        );
        assert_eq!(resolve_action("auth", "login").unwrap(), Action::Login);
    }

    #[test]
    fn test_unknown_names_list_alternatives() {
        let err = resolve_action("exam", "list").unwrap_err().to_string();
        assert!(err.contains("Unknown module 'exam'"));
        assert!(err.contains("exams"));

        let err = resolve_action("notes", "by-topic").unwrap_err().to_string();
        assert!(err.contains("Unknown action 'by-topic' for notes"));
        assert!(err.contains("list"));
    }
}
