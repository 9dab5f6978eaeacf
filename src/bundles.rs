use crate::config::{FormatterKind, RunConfig, Target, FORMATTERS, TARGETS};
use crate::error::{ParseError, RegistrationError};
use crate::hooks::VerboseHook;
use crate::registry::Registry;
use regex::Regex;

pub type Bundle = fn(&mut Registry<RunConfig>) -> Result<(), RegistrationError>;

type Field = fn(&mut RunConfig) -> &mut Vec<String>;

fn append(field: Field) -> impl FnMut(&mut RunConfig, Option<&str>) -> Result<(), ParseError> {
    move |config, arg| {
        field(config).extend(arg.map(str::to_string));
        Ok(())
    }
}

/// Like [`append`] but the argument must compile as a regular expression.
fn append_pattern(
    option: &'static str,
    field: Field,
) -> impl FnMut(&mut RunConfig, Option<&str>) -> Result<(), ParseError> {
    move |config, arg| {
        let pattern = arg.unwrap_or_default();
        Regex::new(pattern).map_err(|e| ParseError::invalid(option, e.to_string()))?;
        field(config).push(pattern.to_string());
        Ok(())
    }
}

fn table_docs(registry: &mut Registry<RunConfig>, rows: Vec<(String, &str)>) {
    let indent = " ".repeat(registry.width());
    for (codes, text) in rows {
        registry.doc(format!("{}{:<18}{}", indent, codes, text).trim_end().to_string());
    }
}

pub fn configure(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-B", "--config", "FILE", "Load FILE containing configuration options"],
        append(|c| &mut c.config_files),
    )?;
    Ok(())
}

pub fn name(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-n", "--name", "RUBY_NAME", "Set the name of the implementation under test"],
        |config, arg| {
            config.name = arg.map(str::to_string);
            Ok(())
        },
    )?;
    Ok(())
}

pub fn targets(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-t", "--target", "TARGET", "Implementation to run the specs, where TARGET is:"],
        |config, arg| {
            config.target = Target::from_code(arg.unwrap_or_default());
            Ok(())
        },
    )?;
    let rows = TARGETS
        .iter()
        .map(|(codes, _, text)| (codes.join(" or "), *text))
        .chain(std::iter::once(("full path to EXE".to_string(), "invokes EXE directly")))
        .collect();
    table_docs(registry, rows);

    registry.on(
        &["-T", "--target-opt", "OPT", "Pass OPT as a flag to the target implementation"],
        append(|c| &mut c.flags),
    )?;
    registry.on(
        &["-I", "--include", "DIR", "Pass -I<DIR> to the target implementation"],
        |config, arg| {
            config.includes.push(format!("-I{}", arg.unwrap_or_default()));
            Ok(())
        },
    )?;
    registry.on(
        &["-r", "--require", "LIBRARY", "Pass -r<LIBRARY> to the target implementation"],
        append(|c| &mut c.requires),
    )?;
    Ok(())
}

pub fn formatters(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-f", "--format", "FORMAT", "Formatter for reporting, where FORMAT is one of:"],
        |config, arg| {
            let code = arg.unwrap_or_default();
            let kind = FormatterKind::from_code(code)
                .ok_or_else(|| ParseError::invalid("--format", format!("Unknown format: {}", code)))?;
            config.formatter = Some(kind);
            Ok(())
        },
    )?;
    let rows = FORMATTERS
        .iter()
        .map(|(codes, kind)| (codes.join(", "), kind.name()))
        .collect();
    table_docs(registry, rows);

    registry.on(
        &["-o", "--output", "FILE", "Write formatter output to FILE"],
        |config, arg| {
            config.output = arg.map(str::to_string);
            Ok(())
        },
    )?;
    Ok(())
}

pub fn filters(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-e", "--example", "STR", "Run examples with descriptions matching STR"],
        append(|c| &mut c.include_descriptions),
    )?;
    registry.on(
        &["-E", "--exclude", "STR", "Exclude examples with descriptions matching STR"],
        append(|c| &mut c.exclude_descriptions),
    )?;
    registry.on(
        &["-p", "--pattern", "PATTERN", "Run examples with descriptions matching PATTERN"],
        append_pattern("--pattern", |c| &mut c.include_patterns),
    )?;
    registry.on(
        &["-P", "--excl-pattern", "PATTERN", "Exclude examples with descriptions matching PATTERN"],
        append_pattern("--excl-pattern", |c| &mut c.exclude_patterns),
    )?;
    registry.on(
        &["-g", "--tag", "TAG", "Run examples with descriptions matching ones tagged with TAG"],
        append(|c| &mut c.include_tags),
    )?;
    registry.on(
        &["-G", "--excl-tag", "TAG", "Exclude examples with descriptions matching ones tagged with TAG"],
        append(|c| &mut c.exclude_tags),
    )?;
    registry.on(
        &["-w", "--profile", "FILE", "Run examples for methods listed in the profile FILE"],
        append(|c| &mut c.include_profiles),
    )?;
    registry.on(
        &["-W", "--excl-profile", "FILE", "Exclude examples for methods listed in the profile FILE"],
        append(|c| &mut c.exclude_profiles),
    )?;
    Ok(())
}

pub fn chdir(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-C", "--chdir", "DIR", "Change the working directory to DIR before running"],
        |config, arg| {
            config.chdir = arg.map(str::to_string);
            Ok(())
        },
    )?;
    Ok(())
}

pub fn prefix(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["--prefix", "STR", "Prepend STR when resolving spec file names"],
        |config, arg| {
            config.prefix = arg.map(str::to_string);
            Ok(())
        },
    )?;
    Ok(())
}

pub fn pretend(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-Z", "--dry-run", "Invoke formatters and other actions, but don't execute the specs"],
        |config, _| {
            config.pretend = true;
            Ok(())
        },
    )?;
    Ok(())
}

pub fn randomize(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-H", "--random", "Randomize the list of spec files"],
        |config, _| {
            config.randomize = true;
            Ok(())
        },
    )?;
    Ok(())
}

pub fn repeat(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-R", "--repeat", "NUMBER", "Repeatedly run an example NUMBER times"],
        |config, arg| {
            let count = arg
                .unwrap_or_default()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ParseError::invalid("--repeat", "expected a positive number"))?;
            config.repeat = Some(count);
            Ok(())
        },
    )?;
    Ok(())
}

pub fn verbose(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-V", "--verbose", "Output the name of each file processed"],
        |config, _| {
            if !config.verbose {
                config.verbose = true;
                config.hooks.register(VerboseHook::new());
            }
            Ok(())
        },
    )?;
    Ok(())
}

pub fn interrupt(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["--int-spec", "Control-C interrupts the current spec only"],
        |config, _| {
            config.abort_on_interrupt = false;
            Ok(())
        },
    )?;
    Ok(())
}

pub fn action_filters(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-K", "--action-tag", "TAG", "Spec descriptions marked with TAG will trigger the specified action"],
        append(|c| &mut c.action_tags),
    )?;
    registry.on(
        &["-S", "--action-string", "STR", "Spec descriptions matching STR will trigger the specified action"],
        append(|c| &mut c.action_strings),
    )?;
    Ok(())
}

pub fn actions(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["--spec-debug", "Invoke the debugger when a spec description matches (-K, -S)"],
        |config, _| {
            config.debugger = true;
            Ok(())
        },
    )?;
    registry.on(
        &["--spec-gdb", "Invoke Gdb when a spec description matches (-K, -S)"],
        |config, _| {
            config.gdb = true;
            Ok(())
        },
    )?;
    Ok(())
}

pub fn debug(registry: &mut Registry<RunConfig>) -> Result<(), RegistrationError> {
    registry.on(
        &["-d", "--debug", "Disable shortening of exception backtraces"],
        |config, _| {
            config.debug = true;
            Ok(())
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bundles: &[Bundle], args: &[&str]) -> (Result<Vec<String>, ParseError>, RunConfig) {
        let mut registry = Registry::new("usage");
        for bundle in bundles {
            bundle(&mut registry).unwrap();
        }
        let mut config = RunConfig::new();
        let result = registry.parse(&mut config, args.iter().copied());
        (result, config)
    }

    #[test]
    fn test_targets() {
        let (result, config) = parse(
            &[targets],
            &["-tj", "-T", "--dev", "-Ilib", "--require=set", "spec/core"],
        );
        assert_eq!(result.unwrap(), vec!["spec/core"]);
        assert_eq!(config.target, Target::JRuby);
        assert_eq!(config.flags, vec!["--dev"]);
        assert_eq!(config.includes, vec!["-Ilib"]);
        assert_eq!(config.requires, vec!["set"]);
    }

    #[test]
    fn test_custom_target() {
        let (_, config) = parse(&[targets], &["--target", "/usr/local/bin/ruby"]);
        assert_eq!(config.target.command(), "/usr/local/bin/ruby");
    }

    #[test]
    fn test_formatters() {
        let (result, config) = parse(&[formatters], &["-fs", "-o", "out.txt"]);
        assert!(result.is_ok());
        assert_eq!(config.formatter, Some(FormatterKind::Specdoc));
        assert_eq!(config.output.as_deref(), Some("out.txt"));
    }

    #[test]
    fn test_unknown_formatter() {
        let (result, config) = parse(&[formatters], &["--format=q"]);
        assert_eq!(result, Err(ParseError::invalid("--format", "Unknown format: q")));
        assert_eq!(config.formatter, None);
    }

    #[test]
    fn test_filters() {
        let (result, config) = parse(
            &[filters],
            &["-e", "Array#pack", "-E", "slow", "-p", "^String", "-P", "x$", "-gfails", "-Gcritical", "-w", "p.yml", "-W", "q.yml"],
        );
        assert!(result.is_ok());
        assert_eq!(config.include_descriptions, vec!["Array#pack"]);
        assert_eq!(config.exclude_descriptions, vec!["slow"]);
        assert_eq!(config.include_patterns, vec!["^String"]);
        assert_eq!(config.exclude_patterns, vec!["x$"]);
        assert_eq!(config.include_tags, vec!["fails"]);
        assert_eq!(config.exclude_tags, vec!["critical"]);
        assert_eq!(config.include_profiles, vec!["p.yml"]);
        assert_eq!(config.exclude_profiles, vec!["q.yml"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let (result, config) = parse(&[filters], &["-p", "("]);
        assert!(matches!(
            result,
            Err(ParseError::InvalidArgument { ref option, .. }) if option == "--pattern"
        ));
        assert!(config.include_patterns.is_empty());
    }

    #[test]
    fn test_mode_switch_cluster() {
        let (result, config) = parse(&[pretend, randomize, debug, verbose], &["-ZHdV", "a_spec.rb"]);
        assert_eq!(result.unwrap(), vec!["a_spec.rb"]);
        assert!(config.pretend);
        assert!(config.randomize);
        assert!(config.debug);
        assert!(config.verbose);
        assert_eq!(config.hooks.names(), vec!["verbose"]);
    }

    #[test]
    fn test_verbose_registers_hook_once() {
        let (_, config) = parse(&[verbose], &["-V", "--verbose"]);
        assert_eq!(config.hooks.len(), 1);
    }

    #[test]
    fn test_repeat() {
        let (_, config) = parse(&[repeat], &["-R3"]);
        assert_eq!(config.repeat, Some(3));

        let (result, _) = parse(&[repeat], &["--repeat", "zero"]);
        assert!(result.is_err());
        let (result, _) = parse(&[repeat], &["-R", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cluster_ending_in_argument_option() {
        let (result, config) = parse(&[pretend, repeat], &["-ZR2", "file"]);
        assert_eq!(result.unwrap(), vec!["file"]);
        assert!(config.pretend);
        assert_eq!(config.repeat, Some(2));
    }

    #[test]
    fn test_misc_bundles() {
        let (result, config) = parse(
            &[configure, name, chdir, prefix, interrupt, action_filters, actions],
            &[
                "-B", "default.mspec", "-n", "rbx", "-C", "/tmp", "--prefix", "spec/ruby",
                "--int-spec", "-K", "fails", "-S", "Array", "--spec-debug", "--spec-gdb",
            ],
        );
        assert!(result.unwrap().is_empty());
        assert_eq!(config.config_files, vec!["default.mspec"]);
        assert_eq!(config.name.as_deref(), Some("rbx"));
        assert_eq!(config.chdir.as_deref(), Some("/tmp"));
        assert_eq!(config.prefix.as_deref(), Some("spec/ruby"));
        assert!(!config.abort_on_interrupt);
        assert_eq!(config.action_tags, vec!["fails"]);
        assert_eq!(config.action_strings, vec!["Array"]);
        assert!(config.debugger);
        assert!(config.gdb);
    }

    #[test]
    fn test_table_docs_follow_option() {
        let mut registry = Registry::new("usage");
        formatters(&mut registry).unwrap();
        let docs = registry.docs();
        assert!(docs[0].contains("--format FORMAT"));
        assert_eq!(docs[1].trim_start(), format!("{:<18}{}", "s, specdoc", "specdoc"));
        assert!(docs[1].starts_with(&" ".repeat(registry.width())));
        assert!(docs.last().unwrap().contains("--output FILE"));
    }
}
