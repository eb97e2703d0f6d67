use serde_json::Value;

use crate::{
    cli::{
        args::{suggest, FlagSpec, ParsedArgs},
        output,
    },
    core::errors::CliError,
    cost::ScenarioParameters,
};

use super::CliContext;

const PARAM_FLAGS: FlagSpec = FlagSpec {
    switches: &[],
    options: &[],
};

pub fn params(ctx: &mut CliContext, raw: &[String]) -> Result<(), CliError> {
    let args = ParsedArgs::parse(raw, &PARAM_FLAGS)?;

    match args.positional(0).unwrap_or("show") {
        "show" => {
            output::info(format!("# {}", ctx.config_manager.path().display()));
            println!("{}", serde_json::to_string_pretty(&ctx.config.parameters)?);
        }
        "set" => {
            let (Some(field), Some(value)) = (args.positional(1), args.positional(2)) else {
                return Err(CliError::Input("usage: params set <field> <value>".into()));
            };
            ctx.config.parameters = with_field(&ctx.config.parameters, field, value)?;
            ctx.config_manager.save(&ctx.config)?;
            output::success(format!("Set {field} = {value}"));
        }
        "reset" => {
            ctx.config.parameters = ScenarioParameters::default();
            ctx.config_manager.save(&ctx.config)?;
            output::success("Scenario parameters reset to defaults.");
        }
        other => {
            return Err(CliError::Command(format!(
                "unknown `params` subcommand `{other}`"
            )))
        }
    }
    Ok(())
}

/// Copy of `params` with one field replaced, validated as a whole.
pub fn with_field(
    params: &ScenarioParameters,
    field: &str,
    raw: &str,
) -> Result<ScenarioParameters, CliError> {
    let mut document = serde_json::to_value(params)?;
    let Some(fields) = document.as_object_mut() else {
        return Err(CliError::Command("parameters are not a JSON object".into()));
    };
    let Some(current) = fields.get(field) else {
        let mut message = format!("unknown parameter `{field}`");
        if let Some(candidate) = suggest(field, fields.keys().map(String::as_str)) {
            message.push_str(&format!(" (did you mean `{candidate}`?)"));
        }
        return Err(CliError::Input(message));
    };

    let replacement = if current.is_string() {
        Value::String(raw.to_string())
    } else {
        serde_json::from_str(raw)
            .map_err(|_| CliError::Input(format!("`{raw}` is not a valid value for {field}")))?
    };
    fields.insert(field.to_string(), replacement);

    let updated: ScenarioParameters = serde_json::from_value(document)
        .map_err(|err| CliError::Input(format!("{field}: {err}")))?;
    updated.validate()?;
    Ok(updated)
}
