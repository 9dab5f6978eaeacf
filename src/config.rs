use crate::hooks::HookRegistry;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Ruby,
    Ruby19,
    Rubinius,
    Rbx,
    JRuby,
    IronRuby,
    MagLev,
    Topaz,
    Opal,
    /// Anything not in the table is taken as the command itself.
    Custom(String),
}

pub const TARGETS: &[(&[&str], Target, &str)] = &[
    (&["r", "ruby"], Target::Ruby, "invokes ruby in PATH"),
    (&["r19", "ruby19"], Target::Ruby19, "invokes ruby1.9 in PATH"),
    (&["x", "rubinius"], Target::Rubinius, "invokes ./bin/rbx"),
    (&["X", "rbx"], Target::Rbx, "invokes rbx in PATH"),
    (&["j", "jruby"], Target::JRuby, "invokes jruby in PATH"),
    (&["i", "ironruby"], Target::IronRuby, "invokes ir in PATH"),
    (&["m", "maglev"], Target::MagLev, "invokes maglev-ruby in PATH"),
    (&["t", "topaz"], Target::Topaz, "invokes topaz in PATH"),
    (&["o", "opal"], Target::Opal, "invokes opal in PATH"),
];

impl Target {
    pub fn from_code(code: &str) -> Self {
        TARGETS
            .iter()
            .find(|(codes, _, _)| codes.contains(&code))
            .map(|(_, target, _)| target.clone())
            .unwrap_or_else(|| Target::Custom(code.to_string()))
    }

    pub fn command(&self) -> &str {
        match self {
            Target::Ruby => "ruby",
            Target::Ruby19 => "ruby1.9",
            Target::Rubinius => "./bin/rbx",
            Target::Rbx => "rbx",
            Target::JRuby => "jruby",
            Target::IronRuby => "ir",
            Target::MagLev => "maglev-ruby",
            Target::Topaz => "topaz",
            Target::Opal => "opal",
            Target::Custom(command) => command,
        }
    }
}

/// Report style selected with `--format`. The configuration keeps the tag;
/// building the actual reporter is up to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterKind {
    Specdoc,
    Html,
    Dotted,
    Describe,
    File,
    Unitdiff,
    Summary,
    Spinner,
    Method,
    Yaml,
    Profile,
    JUnit,
}

pub const FORMATTERS: &[(&[&str], FormatterKind)] = &[
    (&["s", "specdoc"], FormatterKind::Specdoc),
    (&["h", "html"], FormatterKind::Html),
    (&["d", "dot", "dotted"], FormatterKind::Dotted),
    (&["b", "describe"], FormatterKind::Describe),
    (&["f", "file"], FormatterKind::File),
    (&["u", "unit", "unitdiff"], FormatterKind::Unitdiff),
    (&["m", "summary"], FormatterKind::Summary),
    (&["a", "*", "spin"], FormatterKind::Spinner),
    (&["t", "method"], FormatterKind::Method),
    (&["y", "yaml"], FormatterKind::Yaml),
    (&["p", "profile"], FormatterKind::Profile),
    (&["j", "junit"], FormatterKind::JUnit),
];

impl FormatterKind {
    pub fn from_code(code: &str) -> Option<Self> {
        FORMATTERS
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, kind)| *kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormatterKind::Specdoc => "specdoc",
            FormatterKind::Html => "html",
            FormatterKind::Dotted => "dotted",
            FormatterKind::Describe => "describe",
            FormatterKind::File => "file",
            FormatterKind::Unitdiff => "unitdiff",
            FormatterKind::Summary => "summary",
            FormatterKind::Spinner => "spinner",
            FormatterKind::Method => "method",
            FormatterKind::Yaml => "yaml",
            FormatterKind::Profile => "profile",
            FormatterKind::JUnit => "junit",
        }
    }

    pub fn codes(&self) -> &'static [&'static str] {
        FORMATTERS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(codes, _)| *codes)
            .unwrap_or(&[])
    }
}

/// Everything the options decide about a run. Built once per invocation and
/// handed to the parser as its context.
#[derive(Debug)]
pub struct RunConfig {
    pub config_files: Vec<String>,
    pub name: Option<String>,
    pub target: Target,
    pub flags: Vec<String>,
    pub includes: Vec<String>,
    pub requires: Vec<String>,
    pub formatter: Option<FormatterKind>,
    pub output: Option<String>,
    pub include_descriptions: Vec<String>,
    pub exclude_descriptions: Vec<String>,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub include_profiles: Vec<String>,
    pub exclude_profiles: Vec<String>,
    pub action_tags: Vec<String>,
    pub action_strings: Vec<String>,
    pub chdir: Option<String>,
    pub prefix: Option<String>,
    pub pretend: bool,
    pub randomize: bool,
    pub repeat: Option<u32>,
    pub verbose: bool,
    pub abort_on_interrupt: bool,
    pub debugger: bool,
    pub gdb: bool,
    pub debug: bool,
    pub hooks: HookRegistry,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            config_files: Vec::new(),
            name: None,
            target: Target::default(),
            flags: Vec::new(),
            includes: Vec::new(),
            requires: Vec::new(),
            formatter: None,
            output: None,
            include_descriptions: Vec::new(),
            exclude_descriptions: Vec::new(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
            include_profiles: Vec::new(),
            exclude_profiles: Vec::new(),
            action_tags: Vec::new(),
            action_strings: Vec::new(),
            chdir: None,
            prefix: None,
            pretend: false,
            randomize: false,
            repeat: None,
            verbose: false,
            abort_on_interrupt: true,
            debugger: false,
            gdb: false,
            debug: false,
            hooks: HookRegistry::new(),
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "config_files": self.config_files,
            "name": self.name,
            "target": self.target.command(),
            "flags": self.flags,
            "includes": self.includes,
            "requires": self.requires,
            "formatter": self.formatter.map(|f| f.name()),
            "output": self.output,
            "include_descriptions": self.include_descriptions,
            "exclude_descriptions": self.exclude_descriptions,
            "include_patterns": self.include_patterns,
            "exclude_patterns": self.exclude_patterns,
            "include_tags": self.include_tags,
            "exclude_tags": self.exclude_tags,
            "include_profiles": self.include_profiles,
            "exclude_profiles": self.exclude_profiles,
            "action_tags": self.action_tags,
            "action_strings": self.action_strings,
            "chdir": self.chdir,
            "prefix": self.prefix,
            "pretend": self.pretend,
            "randomize": self.randomize,
            "repeat": self.repeat,
            "verbose": self.verbose,
            "abort_on_interrupt": self.abort_on_interrupt,
            "debugger": self.debugger,
            "gdb": self.gdb,
            "debug": self.debug,
            "hooks": self.hooks.names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_lookup() {
        assert_eq!(Target::from_code("r"), Target::Ruby);
        assert_eq!(Target::from_code("jruby"), Target::JRuby);
        assert_eq!(Target::from_code("X").command(), "rbx");
        assert_eq!(Target::from_code("x").command(), "./bin/rbx");
        assert_eq!(
            Target::from_code("/opt/ruby/bin/ruby"),
            Target::Custom("/opt/ruby/bin/ruby".to_string())
        );
        assert_eq!(Target::default().command(), "ruby");
    }

    #[test]
    fn test_formatter_lookup() {
        assert_eq!(FormatterKind::from_code("s"), Some(FormatterKind::Specdoc));
        assert_eq!(FormatterKind::from_code("dot"), Some(FormatterKind::Dotted));
        assert_eq!(FormatterKind::from_code("*"), Some(FormatterKind::Spinner));
        assert_eq!(FormatterKind::from_code("q"), None);
        assert_eq!(FormatterKind::Unitdiff.codes(), &["u", "unit", "unitdiff"]);
    }

    #[test]
    fn test_every_formatter_has_codes() {
        for (codes, kind) in FORMATTERS {
            assert!(!codes.is_empty());
            assert_eq!(kind.codes(), *codes);
            assert_eq!(FormatterKind::from_code(kind.name()).is_some(), kind.name() != "spinner");
        }
    }

    #[test]
    fn test_to_json_defaults() {
        let config = RunConfig::new();
        let value = config.to_json();
        assert_eq!(value["target"], "ruby");
        assert!(value["formatter"].is_null());
        assert_eq!(value["pretend"], false);
        assert_eq!(value["abort_on_interrupt"], true);
        assert_eq!(value["flags"], json!([]));
        assert_eq!(value["hooks"], json!([]));
    }
}
