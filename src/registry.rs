use crate::descriptor::{Action, OptionDescriptor, FLAG_PREFIX};
use crate::error::{ParseError, RegistrationError};
use std::fmt;

pub const DEFAULT_WIDTH: usize = 30;

pub type ExtraHandler<C> = Box<dyn FnMut(&mut C, &str, &mut Vec<String>) -> Result<(), ParseError>>;

pub struct Registry<C> {
    banner: String,
    width: usize,
    pub(crate) options: Vec<OptionDescriptor<C>>,
    docs: Vec<String>,
    pub(crate) extra: Option<ExtraHandler<C>>,
    pub(crate) positionals: Vec<String>,
}

/// Without a custom handler, anything that looks like an option is rejected
/// and everything else becomes a positional.
pub(crate) fn default_extra(token: &str, positionals: &mut Vec<String>) -> Result<(), ParseError> {
    if token.starts_with(FLAG_PREFIX) {
        return Err(ParseError::Unrecognized(token.to_string()));
    }
    positionals.push(token.to_string());
    Ok(())
}

impl<C> Registry<C> {
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
            width: DEFAULT_WIDTH,
            options: Vec::new(),
            docs: Vec::new(),
            extra: None,
            positionals: Vec::new(),
        }
    }

    /// Sets the column at which descriptions start in the help text. Only
    /// affects lines rendered after the call.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn options(&self) -> &[OptionDescriptor<C>] {
        &self.options
    }

    pub fn docs(&self) -> &[String] {
        &self.docs
    }

    pub fn on<F>(&mut self, args: &[&str], action: F) -> Result<&OptionDescriptor<C>, RegistrationError>
    where
        F: FnMut(&mut C, Option<&str>) -> Result<(), ParseError> + 'static,
    {
        self.register(args, Some(Box::new(action)))
    }

    /// Registers an option that only documents itself; matching it has no
    /// effect beyond consuming its argument.
    pub fn add(&mut self, args: &[&str]) -> Result<&OptionDescriptor<C>, RegistrationError> {
        self.register(args, None)
    }

    fn register(
        &mut self,
        args: &[&str],
        action: Option<Action<C>>,
    ) -> Result<&OptionDescriptor<C>, RegistrationError> {
        let option = OptionDescriptor::from_args(args, action)?;

        for form in [option.short(), option.long()].into_iter().flatten() {
            if self.find(form).is_some() {
                log::warn!("option {} is already registered; the earlier one takes precedence", form);
            }
        }

        self.docs.push(option.doc_line(self.width));
        self.options.push(option);
        Ok(&self.options[self.options.len() - 1])
    }

    pub fn doc(&mut self, text: impl Into<String>) {
        self.docs.push(text.into());
    }

    pub fn on_extra<F>(&mut self, handler: F)
    where
        F: FnMut(&mut C, &str, &mut Vec<String>) -> Result<(), ParseError> + 'static,
    {
        self.extra = Some(Box::new(handler));
    }

    pub fn find(&self, opt: &str) -> Option<&OptionDescriptor<C>> {
        self.options.iter().find(|o| o.matches(opt))
    }

    pub(crate) fn position(&self, opt: &str) -> Option<usize> {
        self.options.iter().position(|o| o.matches(opt))
    }

    pub fn render(&self) -> String {
        format!("{}\n\n{}\n", self.banner, self.docs.join("\n"))
    }

    pub fn help(&mut self) -> Result<&OptionDescriptor<C>, RegistrationError>
    where
        C: 'static,
    {
        self.on(&["-h", "--help", "Show this message"], |_, _| {
            Err(ParseError::DisplayHelp)
        })
    }

    pub fn version(&mut self, version: impl Into<String>) -> Result<&OptionDescriptor<C>, RegistrationError>
    where
        C: 'static,
    {
        let version = version.into();
        self.on(&["-v", "--version", "Show version"], move |_, _| {
            Err(ParseError::DisplayVersion(version.clone()))
        })
    }

    /// Like [`Registry::version`] but with a caller supplied action.
    pub fn version_with<F>(&mut self, action: F) -> Result<&OptionDescriptor<C>, RegistrationError>
    where
        F: FnMut(&mut C, Option<&str>) -> Result<(), ParseError> + 'static,
    {
        self.on(&["-v", "--version", "Show version"], action)
    }
}

impl<C> fmt::Display for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("banner", &self.banner)
            .field("width", &self.width)
            .field("options", &self.options)
            .field("positionals", &self.positionals)
            .finish()
    }
}
