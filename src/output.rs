use crate::error::ParseError;
use crate::registry::Registry;
use std::io::{self, Write};
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub struct Output<W> {
    out: W,
}

impl Output<StandardStream> {
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            out: StandardStream::stdout(color_choice),
        }
    }
}

impl Output<Buffer> {
    pub fn buffer() -> Self {
        Self {
            out: Buffer::no_color(),
        }
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(self.out.as_slice()).into_owned()
    }
}

impl<W: WriteColor> Output<W> {
    fn set_color(&mut self, color: Color) {
        let _ = self.out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    }

    fn reset(&mut self) {
        let _ = self.out.reset();
    }

    pub fn print_usage<C>(&mut self, registry: &Registry<C>) -> io::Result<()> {
        write!(self.out, "{}", registry.render())?;
        self.out.flush()
    }

    /// Help prints the usage text alone, a version request prints only the
    /// version, and a real failure prints the usage followed by the error.
    pub fn report<C>(&mut self, registry: &Registry<C>, err: &ParseError) -> io::Result<()> {
        match err {
            ParseError::DisplayHelp => self.print_usage(registry),
            ParseError::DisplayVersion(version) => {
                writeln!(self.out, "{}", version)?;
                self.out.flush()
            }
            _ => {
                self.print_usage(registry)?;
                self.set_color(Color::Red);
                write!(self.out, "{}", err)?;
                self.reset();
                writeln!(self.out)?;
                self.out.flush()
            }
        }
    }
}

impl<C> Registry<C> {
    pub fn parse_or_exit<I, S>(&mut self, ctx: &mut C, args: I, color: bool) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.parse(ctx, args) {
            Ok(positionals) => positionals,
            Err(err) => {
                if err.is_failure() {
                    log::debug!("parse failed: {}", err);
                }
                if let Err(e) = Output::new(color).report(self, &err) {
                    log::warn!("failed to write usage: {}", e);
                }
                std::process::exit(err.exit_code());
            }
        }
    }
}
