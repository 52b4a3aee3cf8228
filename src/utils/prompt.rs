use {
    crate::types::error::XtaskError,
    dialoguer::Confirm,
    log::warn,
    std::io::{ErrorKind, IsTerminal},
};

/// Yes/no questions put to the operator.
pub trait Prompt {
    fn confirm(&self, question: &str) -> Result<bool, XtaskError>;
}

/// Asks on the terminal, defaulting to "no".
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool, XtaskError> {
        if !std::io::stdin().is_terminal() {
            warn!("stdin is not a terminal, answering no to: {question}");
            return Ok(false);
        }

        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .or_else(|e| match e {
                dialoguer::Error::IO(io_err) if io_err.kind() == ErrorKind::Interrupted => {
                    Err(XtaskError::Interrupted)
                }
                dialoguer::Error::IO(io_err) => {
                    warn!("prompt failed ({io_err}), answering no");
                    Ok(false)
                }
            })
    }
}
