//! In-memory stand-ins for processes and prompts.

use {
    super::{
        process::{CommandOutput, Invocation, OutputMode, Runner},
        prompt::Prompt,
    },
    crate::types::error::XtaskError,
    std::{cell::RefCell, collections::VecDeque},
};

type Responder = Box<dyn Fn(&Invocation) -> Result<CommandOutput, XtaskError>>;

/// Records invocations instead of spawning them. Commands succeed with empty
/// output unless a responder matching the command line says otherwise; the
/// most recently added matching responder wins.
#[derive(Default)]
pub struct FakeRunner {
    tools: Vec<String>,
    responders: Vec<(String, Responder)>,
    calls: RefCell<Vec<(Invocation, OutputMode)>>,
}

impl FakeRunner {
    pub fn with_tools(tools: &[&str]) -> Self {
        Self {
            tools: tools.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Answers every invocation whose command line starts with `prefix`.
    pub fn respond(
        mut self,
        prefix: &str,
        respond: impl Fn(&Invocation) -> Result<CommandOutput, XtaskError> + 'static,
    ) -> Self {
        self.responders
            .push((prefix.to_string(), Box::new(respond)));
        self
    }

    pub fn stdout(self, prefix: &str, stdout: &'static str) -> Self {
        self.respond(prefix, move |_| {
            Ok(CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
            })
        })
    }

    pub fn fail(self, prefix: &str, code: i32) -> Self {
        self.respond(prefix, move |inv| {
            Err(XtaskError::CommandFailed {
                command: inv.to_string(),
                code: Some(code),
                stdout: String::new(),
                stderr: String::new(),
            })
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .map(|(invocation, _)| invocation.clone())
            .collect()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    pub fn modes(&self) -> Vec<OutputMode> {
        self.calls.borrow().iter().map(|(_, mode)| *mode).collect()
    }
}

impl Runner for FakeRunner {
    fn is_available(&self, program: &str) -> bool {
        self.tools.iter().any(|tool| tool == program)
    }

    fn run(&self, invocation: &Invocation, mode: OutputMode) -> Result<CommandOutput, XtaskError> {
        self.calls.borrow_mut().push((invocation.clone(), mode));

        if !self.is_available(&invocation.program) {
            return Err(XtaskError::CommandNotFound {
                program: invocation.program.clone(),
            });
        }

        let line = invocation.to_string();
        for (prefix, responder) in self.responders.iter().rev() {
            if line.starts_with(prefix.as_str()) {
                return responder(invocation);
            }
        }
        Ok(CommandOutput::default())
    }
}

/// Replays scripted answers and remembers the questions asked.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<bool>>,
    questions: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            questions: RefCell::default(),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str) -> Result<bool, XtaskError> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(false))
    }
}
