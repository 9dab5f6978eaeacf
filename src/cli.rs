use crate::bundles::{self, Bundle};
use crate::config::RunConfig;
use crate::error::RegistrationError;
use crate::registry::Registry;

pub const BANNER: &str = "usage: runopts [options] (FILE|DIRECTORY|GLOB)+";

const SECTIONS: &[(&str, &[Bundle])] = &[
    (
        "Configuration",
        &[bundles::configure, bundles::name, bundles::chdir, bundles::prefix],
    ),
    ("Target", &[bundles::targets]),
    ("Formatting", &[bundles::formatters]),
    ("Filters", &[bundles::filters]),
    (
        "Running",
        &[
            bundles::pretend,
            bundles::randomize,
            bundles::repeat,
            bundles::verbose,
            bundles::interrupt,
        ],
    ),
    (
        "Actions",
        &[bundles::action_filters, bundles::actions, bundles::debug],
    ),
];

pub fn version() -> String {
    format!("runopts {}", env!("CARGO_PKG_VERSION"))
}

/// The full option set of the runner, grouped into help sections.
pub fn build_registry() -> Result<Registry<RunConfig>, RegistrationError> {
    let mut registry = Registry::new(BANNER);

    for (title, section) in SECTIONS {
        registry.doc(format!(" {}", title));
        for bundle in section.iter() {
            bundle(&mut registry)?;
        }
        registry.doc("");
    }

    registry.doc(" Help");
    registry.version(version())?;
    registry.help()?;
    registry.doc("");
    registry.doc(" Files may be spec files, directories of spec files, or glob patterns.");

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatterKind;
    use crate::error::ParseError;

    #[test]
    fn test_build_registry() {
        let registry = build_registry().unwrap();
        assert!(registry.find("--format").is_some());
        assert!(registry.find("-V").is_some());
        assert!(registry.find("--help").is_some());
        assert!(registry.render().starts_with(BANNER));
    }

    #[test]
    fn test_no_duplicate_forms() {
        let registry = build_registry().unwrap();
        let mut seen = std::collections::HashSet::new();
        for option in registry.options() {
            for form in [option.short(), option.long()].into_iter().flatten() {
                assert!(seen.insert(form.to_string()), "duplicate option {}", form);
            }
        }
    }

    #[test]
    fn test_full_command_line() {
        let mut registry = build_registry().unwrap();
        let mut config = RunConfig::new();
        let files = registry
            .parse(
                &mut config,
                ["-tx", "-fs", "-ZH", "--example=Array#pack", "core/array", "-Ilib", "core/string"],
            )
            .unwrap();
        assert_eq!(files, vec!["core/array", "core/string"]);
        assert_eq!(config.target.command(), "./bin/rbx");
        assert_eq!(config.formatter, Some(FormatterKind::Specdoc));
        assert!(config.pretend);
        assert!(config.randomize);
        assert_eq!(config.include_descriptions, vec!["Array#pack"]);
        assert_eq!(config.includes, vec!["-Ilib"]);
    }

    #[test]
    fn test_version_and_help() {
        let mut registry = build_registry().unwrap();
        let mut config = RunConfig::new();
        assert_eq!(
            registry.parse(&mut config, ["-v"]),
            Err(ParseError::DisplayVersion(version()))
        );
        assert_eq!(registry.parse(&mut config, ["--help"]), Err(ParseError::DisplayHelp));
    }
}
