use std::fmt;
use std::io::{self, Write};

pub trait LifecycleHook {
    fn name(&self) -> &str;

    fn on_start(&mut self, _files: &[String]) {}

    fn on_load(&mut self, _file: &str, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn LifecycleHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: impl LifecycleHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.hooks.iter().map(|h| h.name().to_string()).collect()
    }

    pub fn start(&mut self, files: &[String]) {
        for hook in &mut self.hooks {
            hook.on_start(files);
        }
    }

    pub fn load(&mut self, file: &str, out: &mut dyn Write) -> io::Result<()> {
        for hook in &mut self.hooks {
            hook.on_load(file, out)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Prints each file name as it is loaded, padded to the longest name in the
/// run so reporter output lines up after it.
#[derive(Debug, Default)]
pub struct VerboseHook {
    width: usize,
}

impl VerboseHook {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LifecycleHook for VerboseHook {
    fn name(&self) -> &str {
        "verbose"
    }

    fn on_start(&mut self, files: &[String]) {
        self.width = files.iter().map(|f| f.chars().count()).max().unwrap_or(0);
    }

    fn on_load(&mut self, file: &str, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "\n{:<width$}", file, width = self.width)
    }
}
