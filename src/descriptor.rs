use crate::error::{ParseError, RegistrationError};
use std::fmt;

pub const FLAG_PREFIX: char = '-';

/// Invoked with `Some(argument)` when the option declares a placeholder,
/// otherwise with `None`.
pub type Action<C> = Box<dyn FnMut(&mut C, Option<&str>) -> Result<(), ParseError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Short,
    Long,
    Placeholder,
}

impl Form {
    fn of(input: &str) -> Self {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(FLAG_PREFIX), Some(FLAG_PREFIX)) => Form::Long,
            (Some(FLAG_PREFIX), _) => Form::Short,
            _ => Form::Placeholder,
        }
    }
}

pub struct OptionDescriptor<C> {
    short: Option<String>,
    long: Option<String>,
    arg: Option<String>,
    description: String,
    action: Option<Action<C>>,
}

impl<C> OptionDescriptor<C> {
    /// The last input is the description.
    pub fn from_args(args: &[&str], action: Option<Action<C>>) -> Result<Self, RegistrationError> {
        if args.len() < 2 {
            return Err(RegistrationError::TooFewArguments);
        }
        let (description, forms) = args
            .split_last()
            .ok_or(RegistrationError::TooFewArguments)?;

        let mut short = None;
        let mut long = None;
        let mut arg = None;
        for input in forms {
            let slot = match Form::of(input) {
                Form::Short => &mut short,
                Form::Long => &mut long,
                Form::Placeholder => &mut arg,
            };
            *slot = Some(input.to_string());
        }

        if short.is_none() && long.is_none() {
            return Err(RegistrationError::NoFlagForm(description.to_string()));
        }

        Ok(Self {
            short,
            long,
            arg,
            description: description.to_string(),
            action,
        })
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn takes_arg(&self) -> bool {
        self.arg.is_some()
    }

    pub fn matches(&self, opt: &str) -> bool {
        self.short.as_deref() == Some(opt) || self.long.as_deref() == Some(opt)
    }

    /// One help line, with the flag forms left-justified to `width - 1`
    /// columns ahead of the description.
    pub fn doc_line(&self, width: usize) -> String {
        let mut forms = self.short.clone().unwrap_or_else(|| "  ".to_string());
        if self.long.is_some() {
            forms.push_str(if self.short.is_some() { ", " } else { "  " });
        }
        let head = format!(
            "   {}{} {}",
            forms,
            self.long.as_deref().unwrap_or(""),
            self.arg.as_deref().unwrap_or("")
        );
        format!(
            "{:<width$} {}",
            head,
            self.description,
            width = width.saturating_sub(1)
        )
    }

    pub(crate) fn invoke(&mut self, ctx: &mut C, arg: Option<&str>) -> Result<(), ParseError> {
        match self.action.as_mut() {
            Some(action) => action(ctx, arg),
            None => Ok(()),
        }
    }
}

impl<C> fmt::Debug for OptionDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("arg", &self.arg)
            .field("description", &self.description)
            .field("action", &self.action.is_some())
            .finish()
    }
}
