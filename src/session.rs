use log::{debug, warn};

use crate::builder::RecipeRequestBuilder;
use crate::error::{GenerationError, SessionError};
use crate::generator::RecipeGenerator;
use crate::model::{GenerationRequest, Recipe};

/// Where a session is in its generate/display cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Generating {
        ticket: GenerationTicket,
    },
    Displaying(Recipe),
}

/// Identifies one in-flight generation.
///
/// Results arriving with a ticket that is no longer current (after a
/// cancel) are dropped without touching the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

/// One user's generate/display cycle.
///
/// Transitions:
/// - `Idle --begin--> Generating`
/// - `Generating --finish(Ok)--> Displaying`
/// - `Generating --finish(Err) / cancel--> Idle`
/// - `Displaying --reset--> Idle`
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    issued: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.state, SessionState::Generating { .. })
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match &self.state {
            SessionState::Displaying(recipe) => Some(recipe),
            _ => None,
        }
    }

    /// Start a generation cycle from the form.
    ///
    /// Validation happens before any transition: an empty form leaves the
    /// session idle and the form untouched. On success the form is reset.
    pub fn begin(
        &mut self,
        form: &mut RecipeRequestBuilder,
    ) -> Result<(GenerationTicket, GenerationRequest), SessionError> {
        match self.state {
            SessionState::Idle => {}
            SessionState::Generating { .. } => return Err(SessionError::AlreadyGenerating),
            SessionState::Displaying(_) => return Err(SessionError::RecipeDisplayed),
        }

        let request = form.submit()?;
        form.reset();

        self.issued += 1;
        let ticket = GenerationTicket(self.issued);
        self.state = SessionState::Generating { ticket };
        debug!("Session started generation {:?}", ticket);
        Ok((ticket, request))
    }

    /// Apply the outcome of the generation identified by `ticket`.
    pub fn finish(
        &mut self,
        ticket: GenerationTicket,
        result: Result<Recipe, GenerationError>,
    ) -> Result<&Recipe, SessionError> {
        match self.state {
            SessionState::Generating { ticket: current } if current == ticket => {}
            _ => {
                warn!("Ignoring result of cancelled generation {:?}", ticket);
                return Err(SessionError::Cancelled);
            }
        }

        match result {
            Ok(recipe) => {
                self.state = SessionState::Displaying(recipe);
                self.recipe().ok_or(SessionError::Cancelled)
            }
            Err(e) => {
                self.state = SessionState::Idle;
                Err(e.into())
            }
        }
    }

    /// Abandon the in-flight generation, if any
    pub fn cancel(&mut self) {
        if self.is_generating() {
            self.state = SessionState::Idle;
        }
    }

    /// Discard the displayed recipe
    pub fn reset(&mut self) {
        if let SessionState::Displaying(_) = self.state {
            self.state = SessionState::Idle;
        }
    }

    /// Run a whole cycle: begin, generate, finish.
    pub async fn run(
        &mut self,
        form: &mut RecipeRequestBuilder,
        generator: &dyn RecipeGenerator,
    ) -> Result<&Recipe, SessionError> {
        let (ticket, request) = self.begin(form)?;
        let result = generator.generate(request).await;
        self.finish(ticket, result)
    }
}
