use std::collections::HashMap;

use crate::core::errors::CliError;

/// Flags a command accepts: switches stand alone, options take a value.
pub struct FlagSpec {
    pub switches: &'static [&'static str],
    pub options: &'static [&'static str],
}

impl FlagSpec {
    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.switches.iter().chain(self.options.iter()).copied()
    }
}

#[derive(Debug, Default)]
pub struct ParsedArgs {
    positionals: Vec<String>,
    switches: Vec<String>,
    options: HashMap<String, String>,
}

impl ParsedArgs {
    /// Splits `args` into positionals and `--flag` / `--flag value` / `--flag=value` pairs.
    pub fn parse(args: &[String], flags: &FlagSpec) -> Result<Self, CliError> {
        let mut parsed = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let Some(flag) = arg.strip_prefix("--") else {
                parsed.positionals.push(arg.clone());
                continue;
            };
            let (name, inline) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (flag, None),
            };
            if flags.switches.contains(&name) {
                if inline.is_some() {
                    return Err(CliError::Input(format!("--{name} does not take a value")));
                }
                parsed.switches.push(name.to_string());
            } else if flags.options.contains(&name) {
                let value = match inline {
                    Some(value) => value,
                    None => iter
                        .next()
                        .cloned()
                        .ok_or_else(|| CliError::Input(format!("--{name} expects a value")))?,
                };
                parsed.options.insert(name.to_string(), value);
            } else {
                let mut message = format!("unknown flag --{name}");
                if let Some(candidate) = suggest(name, flags.names()) {
                    message.push_str(&format!(" (did you mean --{candidate}?)"));
                }
                return Err(CliError::Input(message));
            }
        }
        Ok(parsed)
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.iter().any(|switch| switch == name)
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn number(&self, name: &str) -> Result<Option<f64>, CliError> {
        self.option(name)
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| CliError::Input(format!("--{name} expects a number, got `{raw}`")))
            })
            .transpose()
    }

    pub fn count(&self, name: &str) -> Result<Option<u32>, CliError> {
        self.option(name)
            .map(|raw| {
                raw.trim().parse::<u32>().map_err(|_| {
                    CliError::Input(format!("--{name} expects a whole number, got `{raw}`"))
                })
            })
            .transpose()
    }

    pub fn positional(&self, idx: usize) -> Option<&str> {
        self.positionals.get(idx).map(String::as_str)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }
}

/// Closest candidate to `input`, if any is similar enough to be a likely typo.
pub fn suggest<'a>(input: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let needle = input.to_ascii_lowercase();
    candidates
        .into_iter()
        .map(|candidate| {
            let score = strsim::jaro_winkler(&needle, &candidate.to_ascii_lowercase());
            (candidate, score)
        })
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAGS: FlagSpec = FlagSpec {
        switches: &["used", "series"],
        options: &["price", "years"],
    };

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_switches_options_and_positionals() {
        let parsed =
            ParsedArgs::parse(&args(&["show", "--used", "--price", "18000", "--years=3"]), &FLAGS)
                .unwrap();
        assert_eq!(parsed.positional(0), Some("show"));
        assert!(parsed.switch("used"));
        assert!(!parsed.switch("series"));
        assert_eq!(parsed.number("price").unwrap(), Some(18_000.0));
        assert_eq!(parsed.count("years").unwrap(), Some(3));
    }

    #[test]
    fn unknown_flag_suggests_closest_name() {
        let err = ParsedArgs::parse(&args(&["--prise", "1"]), &FLAGS).unwrap_err();
        assert!(err.to_string().contains("did you mean --price?"));
    }

    #[test]
    fn rejects_malformed_numbers() {
        let parsed = ParsedArgs::parse(&args(&["--price", "lots"]), &FLAGS).unwrap();
        assert!(parsed.number("price").is_err());
        let missing = ParsedArgs::parse(&args(&["--years"]), &FLAGS);
        assert!(missing.is_err());
    }
}
