use crate::descriptor::FLAG_PREFIX;
use crate::error::{ParseError, Result};
use crate::registry::{default_extra, Registry};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Unmatched,
    Switch,
    Argument,
}

/// Splits `s` after its first `n` characters.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    let at = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(at)
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl<C> Registry<C> {
    /// Parses `args` (without the program name) and returns the positionals.
    /// The first error stops the parse.
    pub fn parse<I, S>(&mut self, ctx: &mut C, args: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positionals.clear();
        let mut argv: VecDeque<String> = args.into_iter().map(Into::into).collect();

        while let Some(entry) = argv.pop_front() {
            self.parse_entry(ctx, &mut argv, &entry)?;
        }

        Ok(std::mem::take(&mut self.positionals))
    }

    fn parse_entry(&mut self, ctx: &mut C, argv: &mut VecDeque<String>, entry: &str) -> Result<()> {
        let mut chars = entry.chars();
        match (chars.next(), chars.next()) {
            (Some(FLAG_PREFIX), Some(FLAG_PREFIX)) => {
                let (opt, arg) = match entry.split_once('=') {
                    Some((opt, arg)) => (opt, Some(arg)),
                    None => (entry, None),
                };
                log::trace!("long option {} (inline argument: {:?})", opt, arg);
                self.process(ctx, argv, entry, opt, arg)?;
                Ok(())
            }
            (Some(FLAG_PREFIX), Some(_)) => self.parse_short(ctx, argv, entry),
            _ => self.unmatched(ctx, entry),
        }
    }

    fn parse_short(&mut self, ctx: &mut C, argv: &mut VecDeque<String>, entry: &str) -> Result<()> {
        let (opt, mut rest) = split_chars(entry, 2);
        log::trace!("short option {} (remainder: {:?})", opt, rest);
        let mut step = self.process(ctx, argv, entry, opt, non_empty(rest))?;

        // A cluster continues only while every flag in it is a switch.
        while step == Step::Switch && !rest.is_empty() {
            let (head, tail) = split_chars(rest, 1);
            let opt = format!("{}{}", FLAG_PREFIX, head);
            log::trace!("clustered option {} in {}", opt, entry);
            step = self.process(ctx, argv, entry, &opt, non_empty(tail))?;
            rest = tail;
        }
        Ok(())
    }

    fn process(
        &mut self,
        ctx: &mut C,
        argv: &mut VecDeque<String>,
        entry: &str,
        opt: &str,
        arg: Option<&str>,
    ) -> Result<Step> {
        let Some(index) = self.position(opt) else {
            self.unmatched(ctx, entry)?;
            return Ok(Step::Unmatched);
        };

        let option = &mut self.options[index];
        if !option.takes_arg() {
            log::debug!("matched {}", opt);
            option.invoke(ctx, None)?;
            return Ok(Step::Switch);
        }

        let pulled;
        let arg = match arg {
            Some(arg) => arg,
            None => {
                pulled = argv
                    .pop_front()
                    .ok_or_else(|| ParseError::MissingArgument(opt.to_string()))?;
                pulled.as_str()
            }
        };
        log::debug!("matched {} with argument {:?}", opt, arg);
        option.invoke(ctx, Some(arg))?;
        Ok(Step::Argument)
    }

    fn unmatched(&mut self, ctx: &mut C, token: &str) -> Result<()> {
        log::trace!("unmatched token {:?}", token);
        match self.extra.as_mut() {
            Some(extra) => extra(ctx, token, &mut self.positionals),
            None => default_extra(token, &mut self.positionals),
        }
    }
}
