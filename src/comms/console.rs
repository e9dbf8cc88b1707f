//! Console channel: reads lines from stdin, answers each through the
//! [`ChatService`], prints the reply to stdout.
//!
//! Runs until the `shutdown` token is cancelled (Ctrl-C), `/quit` is typed,
//! or stdin is closed. Arabic queries print the English answer followed by
//! the translated one, so the user can compare the two.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chat::{ChatHistory, ChatService, Role};
use crate::error::AppError;
use crate::lang::{self, Lang};

const RULE: &str = "─────────────────────────────────";

/// Whether the read loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    /// Shown in the banner; `[bot] name` in the config.
    name: String,
    service: ChatService,
    history: ChatHistory,
    /// Result of the startup health probe.
    translation_available: bool,
}

impl Console {
    pub fn new(
        name: impl Into<String>,
        service: ChatService,
        history_cap: usize,
        translation_available: bool,
    ) -> Self {
        Self {
            name: name.into(),
            service,
            history: ChatHistory::new(history_cap),
            translation_available,
        }
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub async fn run<R, W>(
        &mut self,
        input: R,
        out: &mut W,
        shutdown: CancellationToken,
    ) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!("console started, type a question and press Enter. Ctrl-C to quit.");
        self.print_banner(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    writeln!(out)?;
                    info!("console shutting down");
                    break;
                }

                line = lines.next_line() => {
                    match line {
                        Err(e) => {
                            warn!("console read error: {e}");
                            break;
                        }
                        Ok(None) => {
                            info!("console stdin closed");
                            break;
                        }
                        Ok(Some(line)) => {
                            if self.handle_line(&line, out).await? == Flow::Quit {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn print_banner<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        writeln!(out, "{RULE}")?;
        writeln!(out, " {}: bilingual Q&A console  (/history, /quit, Ctrl-C)", self.name)?;
        writeln!(out, "{RULE}")?;
        if !self.translation_available {
            writeln!(
                out,
                "! Translation service is not available. Arabic translation will not work until it is reachable."
            )?;
        }
        Ok(())
    }

    /// Handle one input line: a command or a question.
    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, AppError> {
        let input = line.trim();
        match input {
            "" => return Ok(Flow::Continue),
            "/quit" => return Ok(Flow::Quit),
            "/history" => {
                if self.history.is_empty() {
                    writeln!(out, "(no history)")?;
                }
                for turn in self.history.turns() {
                    writeln!(out, "{}: {}", turn.role, turn.content)?;
                }
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        debug!(input_len = input.len(), "console received line");
        self.history.push(Role::User, input);

        if !self.translation_available && lang::detect(input) == Lang::Arabic {
            writeln!(
                out,
                "! Arabic detected but the translation service is not available. Translation may not work properly."
            )?;
        }

        let outcome = self.service.handle_query(input).await;

        writeln!(out, "{}", outcome.english_response)?;
        self.history.push(Role::Assistant, outcome.english_response.as_str());
        if outcome.lang == Lang::Arabic {
            let arabic = format!("(Arabic): {}", outcome.reply);
            writeln!(out, "{arabic}")?;
            self.history.push(Role::Assistant, arabic);
        }

        Ok(Flow::Continue)
    }
}
