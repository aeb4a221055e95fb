//! Interactive menu console.
//!
//! Reads menu choices and fields line by line, turns them into [`Command`]s and
//! prints each [`Outcome`]. Works over any reader/writer pair so sessions can be
//! scripted.

use std::io::{BufRead, Write};

use crate::commands::{dispatch, Command};
use crate::error::{Result, ServiceError};
use crate::state::AppState;

const MENU: &str = "\
===== Electricity Bill Generator =====
1. Add Customer
2. Record Usage
3. Generate Bill
4. Exit
5. Usage History";

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    AddCustomer,
    RecordUsage,
    GenerateBill,
    Exit,
    UsageHistory,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddCustomer),
            "2" => Some(Self::RecordUsage),
            "3" => Some(Self::GenerateBill),
            "4" => Some(Self::Exit),
            "5" => Some(Self::UsageHistory),
            _ => None,
        }
    }
}

/// A console session over an input and an output stream.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a session.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the menu loop until the operator exits or input ends.
    ///
    /// Command failures are printed and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Io` if reading input or writing output fails.
    pub fn run(&mut self, state: &AppState) -> Result<()> {
        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(choice) = self.prompt("Choose option: ")? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&choice) else {
                tracing::debug!(choice = %choice.trim(), "Unknown menu choice");
                writeln!(self.output, "Invalid option.")?;
                continue;
            };

            let command = match self.read_command(choice) {
                Ok(Some(command)) => command,
                // Input ended partway through a command
                Ok(None) => break,
                Err(err) if err.is_recoverable() => {
                    self.report(&err)?;
                    continue;
                }
                Err(err) => return Err(err),
            };

            match dispatch(state, command) {
                Ok(outcome) => {
                    writeln!(self.output, "{outcome}")?;
                    if outcome.is_exit() {
                        break;
                    }
                }
                Err(err) if err.is_recoverable() => self.report(&err)?,
                Err(err) => return Err(err),
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Collect the fields for the chosen menu option.
    ///
    /// Returns `Ok(None)` if input ends before all fields are read.
    fn read_command(&mut self, choice: MenuChoice) -> Result<Option<Command>> {
        let command = match choice {
            MenuChoice::AddCustomer => {
                let Some(meter_no) = self.prompt("Meter No : ")? else {
                    return Ok(None);
                };
                let Some(name) = self.prompt("Name     : ")? else {
                    return Ok(None);
                };
                let Some(address) = self.prompt("Address  : ")? else {
                    return Ok(None);
                };
                let Some(email) = self.prompt("Email    : ")? else {
                    return Ok(None);
                };
                Command::AddCustomer {
                    meter_no,
                    name,
                    address,
                    email,
                }
            }
            MenuChoice::RecordUsage => {
                let Some(meter_no) = self.prompt("Meter No : ")? else {
                    return Ok(None);
                };
                let Some(month) = self.prompt("Month    : ")? else {
                    return Ok(None);
                };
                let Some(units) = self.prompt("Units    : ")? else {
                    return Ok(None);
                };
                let units = units.trim().parse::<i64>().map_err(|_| {
                    ServiceError::InvalidInput(format!(
                        "units must be a whole number, got {units:?}"
                    ))
                })?;
                Command::RecordUsage {
                    meter_no,
                    month,
                    units,
                }
            }
            MenuChoice::GenerateBill => {
                let Some(meter_no) = self.prompt("Meter No : ")? else {
                    return Ok(None);
                };
                let Some(month) = self.prompt("Month    : ")? else {
                    return Ok(None);
                };
                Command::GenerateBill { meter_no, month }
            }
            MenuChoice::Exit => Command::Exit,
            MenuChoice::UsageHistory => {
                let Some(meter_no) = self.prompt("Meter No : ")? else {
                    return Ok(None);
                };
                Command::UsageHistory { meter_no }
            }
        };

        Ok(Some(command))
    }

    /// Print a prompt and read one line, without its line ending.
    ///
    /// Returns `Ok(None)` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn report(&mut self, err: &ServiceError) -> Result<()> {
        tracing::warn!(error = %err, "Command failed");
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }

    /// Consume the session and return the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}
