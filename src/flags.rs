use crate::error::ShellError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        flags.insert(
            "help".to_string(),
            Flag {
                short: "-h".to_string(),
                long: "--help".to_string(),
                description: "Print this help message".to_string(),
                value: None,
            },
        );

        flags.insert(
            "version".to_string(),
            Flag {
                short: "-v".to_string(),
                long: "--version".to_string(),
                description: "Show version information".to_string(),
                value: None,
            },
        );

        flags.insert(
            "quiet".to_string(),
            Flag {
                short: "-q".to_string(),
                long: "--quiet".to_string(),
                description: "Suppress the banner and warnings".to_string(),
                value: None,
            },
        );

        flags.insert(
            "history".to_string(),
            Flag {
                short: "-f".to_string(),
                long: "--history".to_string(),
                description: "Use a custom history file path".to_string(),
                value: None,
            },
        );

        flags.insert(
            "proc-metrics".to_string(),
            Flag {
                short: "-p".to_string(),
                long: "--proc-metrics".to_string(),
                description: "Read metrics from /proc instead of the native collector".to_string(),
                value: None,
            },
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            let mut matched = false;

            for flag in self.flags.values_mut() {
                if arg == &flag.short || arg == &flag.long {
                    matched = true;
                    // Only the history flag takes a value
                    if arg == "-f" || arg == "--history" {
                        if i + 1 < args.len() {
                            flag.value = Some(args[i + 1].clone());
                            i += 1;
                        } else {
                            return Err(ShellError::FlagError(format!(
                                "Flag {} requires a value",
                                arg
                            )));
                        }
                    } else {
                        flag.value = Some("true".to_string());
                    }
                }
            }

            if !matched {
                return Err(ShellError::FlagError(format!("Unknown flag: {}", arg)));
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: ostium [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boolean_flags() {
        let mut flags = Flags::new();
        flags
            .parse(&["-q".to_string(), "--proc-metrics".to_string()])
            .unwrap();
        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("proc-metrics"));
        assert!(!flags.is_set("help"));
    }

    #[test]
    fn test_parse_history_value() {
        let mut flags = Flags::new();
        flags
            .parse(&["--history".to_string(), "/tmp/hist".to_string()])
            .unwrap();
        assert_eq!(flags.get_value("history").map(String::as_str), Some("/tmp/hist"));
    }

    #[test]
    fn test_history_flag_requires_value() {
        let mut flags = Flags::new();
        let result = flags.parse(&["--history".to_string()]);
        assert!(matches!(result, Err(ShellError::FlagError(_))));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let mut flags = Flags::new();
        let result = flags.parse(&["--bogus".to_string()]);
        assert!(matches!(result, Err(ShellError::FlagError(_))));
    }
}
