//! Interview session aggregate.
//!
//! Owns the transcript, the phase state machine, the topic cursor, and the
//! per-topic turn counter checked against the effective plan budget.

use serde::{Deserialize, Serialize};

use super::message::{InterviewMessage, MessageRole};
use super::state::InterviewPhase;
use super::topic_result::TopicResult;
use crate::domain::foundation::{
    BotId, DomainError, ErrorCode, InterviewId, StateMachine, Timestamp,
};
use crate::domain::plan::{InterviewPlan, TopicBudget};

/// An AI-led interview session driven by an effective plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    id: InterviewId,
    bot_id: BotId,
    plan: InterviewPlan,
    phase: InterviewPhase,
    topic_index: usize,
    turns_in_topic: u32,
    results: Vec<TopicResult>,
    messages: Vec<InterviewMessage>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl InterviewSession {
    /// Creates a new pending session for a bot with its effective plan.
    pub fn new(id: InterviewId, bot_id: BotId, plan: InterviewPlan) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            bot_id,
            plan,
            phase: InterviewPhase::Pending,
            topic_index: 0,
            turns_in_topic: 0,
            results: Vec::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrates a session from persisted state. No validation is applied;
    /// the repository is trusted to hand back what it was given.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: InterviewId,
        bot_id: BotId,
        plan: InterviewPlan,
        phase: InterviewPhase,
        topic_index: usize,
        turns_in_topic: u32,
        results: Vec<TopicResult>,
        messages: Vec<InterviewMessage>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            bot_id,
            plan,
            phase,
            topic_index,
            turns_in_topic,
            results,
            messages,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> InterviewId {
        self.id
    }

    pub fn bot_id(&self) -> BotId {
        self.bot_id
    }

    pub fn plan(&self) -> &InterviewPlan {
        &self.plan
    }

    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    pub fn topic_index(&self) -> usize {
        self.topic_index
    }

    pub fn turns_in_topic(&self) -> u32 {
        self.turns_in_topic
    }

    pub fn results(&self) -> &[TopicResult] {
        &self.results
    }

    pub fn messages(&self) -> &[InterviewMessage] {
        &self.messages
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The topic currently under discussion, if the session is in the loop.
    pub fn current_topic(&self) -> Option<&TopicBudget> {
        if self.phase.in_topic_loop() {
            self.plan.ordered_topics().nth(self.topic_index)
        } else {
            None
        }
    }

    /// Returns true if another topic exists after the current one.
    pub fn has_remaining_topics(&self) -> bool {
        match self.phase {
            InterviewPhase::Started => self.plan.topic_count() > 0,
            InterviewPhase::Evaluated => self.topic_index + 1 < self.plan.topic_count(),
            _ => false,
        }
    }

    /// Returns true if the current topic's turn budget is spent.
    pub fn turn_budget_spent(&self) -> bool {
        match self.current_topic() {
            Some(topic) => self.turns_in_topic >= topic.max_turns,
            None => false,
        }
    }

    /// Opens the interview: `Pending -> Started`.
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.transition(InterviewPhase::Started)
    }

    /// Enters `Explaining` for the next topic, advancing the topic cursor.
    ///
    /// From `Started` the cursor stays on the first topic; from `Evaluated`
    /// it moves forward. The per-topic turn counter resets.
    pub fn begin_next_topic(&mut self) -> Result<&TopicBudget, DomainError> {
        self.ensure_mutable()?;
        if !self.has_remaining_topics() {
            return Err(DomainError::new(
                ErrorCode::TopicOutOfRange,
                "No remaining topics to begin",
            ));
        }
        if self.phase == InterviewPhase::Evaluated {
            self.topic_index += 1;
        }
        self.transition(InterviewPhase::Explaining)?;
        self.turns_in_topic = 0;
        self.current_topic().ok_or_else(|| {
            DomainError::new(ErrorCode::TopicOutOfRange, "Topic cursor out of range")
        })
    }

    /// Moves the current topic into the probing phase: `Explaining -> Quiz`.
    pub fn enter_quiz(&mut self) -> Result<(), DomainError> {
        self.transition(InterviewPhase::Quiz)
    }

    /// Records the evaluation for the current topic: `Quiz -> Evaluated`.
    pub fn record_topic_result(&mut self, result: TopicResult) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        let current = self.current_topic().map(|t| t.id.clone());
        if current.as_deref() != Some(result.topic_id.as_str()) {
            return Err(DomainError::new(
                ErrorCode::TopicOutOfRange,
                format!(
                    "Result for topic '{}' does not match current topic",
                    result.topic_id
                ),
            ));
        }
        self.transition(InterviewPhase::Evaluated)?;
        self.results.push(result);
        Ok(())
    }

    /// Completes the interview. Valid from any non-pending active phase;
    /// after this the session is immutable.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition(InterviewPhase::Completed)
    }

    /// Appends a user message, counting it against the topic turn budget
    /// while inside the topic loop.
    pub fn add_user_message(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        if !self.phase.accepts_user_input() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Phase {:?} does not accept user input", self.phase),
            ));
        }
        self.messages.push(InterviewMessage::user(content));
        if self.phase.in_topic_loop() {
            self.turns_in_topic += 1;
        }
        self.touch();
        Ok(())
    }

    /// Appends a user reply to an administrative prompt (stop confirmation,
    /// consent clarification) without counting it against the topic turn
    /// budget.
    pub fn add_user_interjection(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        if !self.phase.accepts_user_input() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Phase {:?} does not accept user input", self.phase),
            ));
        }
        self.messages.push(InterviewMessage::user(content));
        self.touch();
        Ok(())
    }

    /// Appends an assistant message.
    pub fn add_assistant_message(
        &mut self,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.messages.push(InterviewMessage::assistant(content));
        self.touch();
        Ok(())
    }

    /// Appends a system message (prompt notes, consent records).
    pub fn add_system_message(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.messages
            .push(InterviewMessage::new(MessageRole::System, content));
        self.touch();
        Ok(())
    }

    fn transition(&mut self, target: InterviewPhase) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.phase = self.phase.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
        })?;
        self.touch();
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.phase == InterviewPhase::Completed {
            return Err(DomainError::new(
                ErrorCode::InterviewCompleted,
                "Interview is completed and immutable",
            ));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interview::TopicStatus;
    use crate::domain::plan::PlanBuilder;

    fn session() -> InterviewSession {
        let plan = PlanBuilder::new(20, 60)
            .with_scan_topic("brand", "Brand positioning")
            .with_deep_topic("pricing", "Pricing strategy")
            .build()
            .unwrap();
        InterviewSession::new(InterviewId::new(), BotId::new(), plan)
    }

    fn passed(topic: &str) -> TopicResult {
        TopicResult::new(topic, TopicStatus::Passed, 0.9).unwrap()
    }

    #[test]
    fn full_topic_loop_advances_index_and_records_results() {
        let mut s = session();
        s.start().unwrap();

        let first = s.begin_next_topic().unwrap().id.clone();
        assert_eq!(first, "brand");
        assert_eq!(s.topic_index(), 0);
        s.enter_quiz().unwrap();
        s.record_topic_result(passed("brand")).unwrap();

        let second = s.begin_next_topic().unwrap().id.clone();
        assert_eq!(second, "pricing");
        assert_eq!(s.topic_index(), 1);
        s.enter_quiz().unwrap();
        s.record_topic_result(passed("pricing")).unwrap();

        assert!(!s.has_remaining_topics());
        s.complete().unwrap();
        assert_eq!(s.phase(), InterviewPhase::Completed);
        assert_eq!(s.results().len(), 2);
    }

    #[test]
    fn completed_session_is_immutable() {
        let mut s = session();
        s.start().unwrap();
        s.complete().unwrap();

        assert!(matches!(
            s.add_user_message("hello").unwrap_err().code,
            ErrorCode::InterviewCompleted
        ));
        assert!(s.begin_next_topic().is_err());
        assert!(s.complete().is_err());
    }

    #[test]
    fn interjections_do_not_spend_the_topic_budget() {
        let mut s = session();
        s.start().unwrap();
        s.begin_next_topic().unwrap();

        s.add_user_message("risposta sul tema").unwrap();
        assert_eq!(s.turns_in_topic(), 1);

        s.add_user_interjection("no, continuiamo pure").unwrap();
        assert_eq!(s.turns_in_topic(), 1);

        s.complete().unwrap();
        assert!(matches!(
            s.add_user_interjection("ancora").unwrap_err().code,
            ErrorCode::InterviewCompleted
        ));
    }

    #[test]
    fn user_turns_count_against_topic_budget() {
        let mut s = session();
        s.start().unwrap();
        let budget = s.begin_next_topic().unwrap().max_turns;

        for _ in 0..budget {
            assert!(!s.turn_budget_spent());
            s.add_user_message("risposta").unwrap();
            s.add_assistant_message("domanda").unwrap();
        }
        assert!(s.turn_budget_spent());
    }

    #[test]
    fn turn_counter_resets_on_next_topic() {
        let mut s = session();
        s.start().unwrap();
        s.begin_next_topic().unwrap();
        s.add_user_message("risposta").unwrap();
        s.enter_quiz().unwrap();
        s.record_topic_result(passed("brand")).unwrap();

        s.begin_next_topic().unwrap();
        assert_eq!(s.turns_in_topic(), 0);
    }

    #[test]
    fn result_must_match_current_topic() {
        let mut s = session();
        s.start().unwrap();
        s.begin_next_topic().unwrap();
        s.enter_quiz().unwrap();

        let err = s.record_topic_result(passed("pricing")).unwrap_err();
        assert_eq!(err.code, ErrorCode::TopicOutOfRange);
    }

    #[test]
    fn cannot_begin_topic_past_the_last_one() {
        let mut s = session();
        s.start().unwrap();
        s.begin_next_topic().unwrap();
        s.enter_quiz().unwrap();
        s.record_topic_result(passed("brand")).unwrap();
        s.begin_next_topic().unwrap();
        s.enter_quiz().unwrap();
        s.record_topic_result(passed("pricing")).unwrap();

        let err = s.begin_next_topic().unwrap_err();
        assert_eq!(err.code, ErrorCode::TopicOutOfRange);
    }

    #[test]
    fn user_input_rejected_before_start() {
        let mut s = session();
        let err = s.add_user_message("ciao").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn closure_allowed_mid_quiz() {
        let mut s = session();
        s.start().unwrap();
        s.begin_next_topic().unwrap();
        s.enter_quiz().unwrap();
        s.complete().unwrap();
        assert_eq!(s.phase(), InterviewPhase::Completed);
    }
}
