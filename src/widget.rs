//! Chat widget: submit -> indicator -> /ask -> bot or error turn.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::backend::{AskEndpoint, AskError};
use crate::state::{InputState, Message, Transcript, TurnToken};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("chat widget is already initialized")]
    AlreadyInitialized,
    #[error("chat widget is not initialized")]
    NotInitialized,
}

/// Result of one /ask call, tagged with the turn it answers.
#[derive(Debug)]
pub struct Completion {
    pub token: TurnToken,
    pub result: Result<String, AskError>,
}

pub struct ChatWidget<T: Transcript> {
    transcript: T,
    input: InputState,
    endpoint: Arc<dyn AskEndpoint>,
    runtime: Handle,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    /// Submitted text per outstanding turn.
    pending: HashMap<TurnToken, String>,
    next_token: u64,
    initialized: bool,
}

impl<T: Transcript> ChatWidget<T> {
    pub fn new(transcript: T, endpoint: Arc<dyn AskEndpoint>, runtime: Handle) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            transcript,
            input: InputState::default(),
            endpoint,
            runtime,
            completions_tx,
            completions_rx,
            pending: HashMap::new(),
            next_token: 0,
            initialized: false,
        }
    }

    /// Binds the submit path. Allowed once per widget.
    pub fn initialize(&mut self) -> Result<(), WidgetError> {
        if self.initialized {
            return Err(WidgetError::AlreadyInitialized);
        }
        self.initialized = true;
        tracing::info!("chat widget ready");
        Ok(())
    }

    pub fn transcript(&self) -> &T {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut T {
        &mut self.transcript
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Sends the input field verbatim and returns without waiting.
    pub fn handle_submit(&mut self) -> Result<TurnToken, WidgetError> {
        if !self.initialized {
            return Err(WidgetError::NotInitialized);
        }
        let raw = self.input.take();
        self.transcript.append_turn(Message::user(raw.clone()));

        let token = TurnToken::new(self.next_token);
        self.next_token += 1;
        self.transcript.append_indicator(token);
        self.transcript.scroll_to_end();
        self.pending.insert(token, raw.clone());

        tracing::info!(%token, bytes = raw.len(), "submitting turn");
        let endpoint = Arc::clone(&self.endpoint);
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = endpoint.ask(&raw).await;
            // Receiver lives as long as the widget; a send error means we are shutting down.
            let _ = tx.send(Completion { token, result });
        });
        Ok(token)
    }

    /// Resolves the indicator for `token` into a bot turn or an error turn.
    pub fn on_response(&mut self, token: TurnToken, result: Result<String, AskError>) {
        let Some(question) = self.pending.remove(&token) else {
            tracing::warn!(%token, "response for unknown turn dropped");
            return;
        };
        let reply = match result {
            Ok(text) => {
                tracing::info!(%token, asked = question.len(), answered = text.len(), "turn answered");
                Message::bot(text)
            }
            Err(e) => {
                tracing::error!(%token, asked = question.len(), error = %e, "turn failed");
                Message::error(format!("message failed to send: {e}"))
            }
        };
        // The reply takes the indicator's slot, right under its question.
        if !self.transcript.resolve_indicator(token, reply) {
            tracing::warn!(%token, "typing indicator already gone; reply appended");
        }
        self.transcript.scroll_to_end();
    }

    /// Applies every completion that has arrived. Never blocks.
    pub fn poll_responses(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(Completion { token, result }) = self.completions_rx.try_recv() {
            self.on_response(token, result);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use reqwest::StatusCode;
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    use crate::state::{ChatState, Entry, MessageRole};

    /// Endpoint whose answers are released by the test, per message.
    #[derive(Default)]
    struct ScriptedEndpoint {
        waiting: Mutex<HashMap<String, oneshot::Receiver<Result<String, AskError>>>>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedEndpoint {
        fn expect(&self, message: &str) -> oneshot::Sender<Result<String, AskError>> {
            let (tx, rx) = oneshot::channel();
            self.waiting.lock().unwrap().insert(message.to_owned(), rx);
            tx
        }
    }

    #[async_trait::async_trait]
    impl AskEndpoint for ScriptedEndpoint {
        async fn ask(&self, message: &str) -> Result<String, AskError> {
            self.seen.lock().unwrap().push(message.to_owned());
            let rx = self.waiting.lock().unwrap().remove(message);
            match rx {
                Some(rx) => rx.await.unwrap_or_else(|_| {
                    Err(AskError::MalformedPayload("script dropped".into()))
                }),
                None => Err(AskError::MalformedPayload(format!("unscripted: {message}"))),
            }
        }
    }

    fn widget(endpoint: &Arc<ScriptedEndpoint>) -> ChatWidget<ChatState> {
        let endpoint: Arc<dyn AskEndpoint> = endpoint.clone();
        let mut w = ChatWidget::new(ChatState::default(), endpoint, Handle::current());
        w.initialize().unwrap();
        w
    }

    fn type_text(w: &mut ChatWidget<ChatState>, text: &str) {
        for c in text.chars() {
            w.input_mut().insert(c);
        }
    }

    async fn next_completion(w: &mut ChatWidget<ChatState>) {
        let c = timeout(Duration::from_secs(2), w.completions_rx.recv())
            .await
            .expect("completion timed out")
            .expect("channel closed");
        w.on_response(c.token, c.result);
    }

    fn rendered(w: &ChatWidget<ChatState>) -> Vec<String> {
        w.transcript().messages().map(|m| m.display_text()).collect()
    }

    #[tokio::test]
    async fn happy_path() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        let reply = endpoint.expect("hello");
        let mut w = widget(&endpoint);

        assert_eq!(w.transcript().indicator_count(), 0);
        type_text(&mut w, "hello");
        w.handle_submit().unwrap();

        assert_eq!(rendered(&w), vec!["You: hello"]);
        assert_eq!(w.transcript().indicator_count(), 1);
        assert_eq!(w.input().value(), "");

        reply.send(Ok("hi there".into())).unwrap();
        next_completion(&mut w).await;

        assert_eq!(rendered(&w), vec!["You: hello", "Assistant: hi there"]);
        assert_eq!(w.transcript().indicator_count(), 0);
        assert_eq!(w.pending_count(), 0);
        assert!(w.transcript().follow);
    }

    #[tokio::test]
    async fn empty_submission_is_still_sent() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        let reply = endpoint.expect("");
        let mut w = widget(&endpoint);

        w.handle_submit().unwrap();
        assert_eq!(rendered(&w), vec!["You: "]);

        reply.send(Ok("say something".into())).unwrap();
        next_completion(&mut w).await;
        assert_eq!(endpoint.seen.lock().unwrap().as_slice(), [String::new()]);
    }

    #[tokio::test]
    async fn failure_resolves_indicator_to_error_turn() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        let reply = endpoint.expect("hello");
        let mut w = widget(&endpoint);

        type_text(&mut w, "hello");
        w.handle_submit().unwrap();
        reply
            .send(Err(AskError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "boom".into(),
            }))
            .unwrap();
        next_completion(&mut w).await;

        let last = w.transcript().messages().last().unwrap().clone();
        assert_eq!(last.role, MessageRole::Error);
        assert!(last.content.starts_with("message failed to send"));
        assert!(last.content.contains("boom"));
        assert_eq!(w.transcript().indicator_count(), 0);
    }

    #[tokio::test]
    async fn sequential_turns_interleave_in_order() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        let mut w = widget(&endpoint);

        for i in 0..4 {
            let msg = format!("question {i}");
            let reply = endpoint.expect(&msg);
            type_text(&mut w, &msg);
            w.handle_submit().unwrap();
            reply.send(Ok(format!("answer {i}"))).unwrap();
            next_completion(&mut w).await;
        }

        let roles: Vec<MessageRole> = w.transcript().messages().map(|m| m.role).collect();
        assert_eq!(roles.len(), 8);
        for (i, pair) in roles.chunks(2).enumerate() {
            assert_eq!(pair, [MessageRole::User, MessageRole::Bot], "turn {i}");
        }
        let texts = rendered(&w);
        assert_eq!(texts[6], "You: question 3");
        assert_eq!(texts[7], "Assistant: answer 3");
    }

    #[tokio::test]
    async fn overlapping_turns_pair_by_token() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        let first_reply = endpoint.expect("first");
        let second_reply = endpoint.expect("second");
        let mut w = widget(&endpoint);

        type_text(&mut w, "first");
        let first = w.handle_submit().unwrap();
        type_text(&mut w, "second");
        let second = w.handle_submit().unwrap();
        assert_ne!(first, second);
        assert_eq!(w.transcript().indicator_count(), 2);

        second_reply.send(Ok("second answer".into())).unwrap();
        next_completion(&mut w).await;

        // The first turn's indicator survives the second turn's answer.
        let typing: Vec<TurnToken> = w
            .transcript()
            .entries
            .iter()
            .filter_map(|e| match e {
                Entry::Typing(t) => Some(*t),
                Entry::Turn(_) => None,
            })
            .collect();
        assert_eq!(typing, vec![first]);
        assert_eq!(rendered(&w), vec!["You: first", "You: second", "Assistant: second answer"]);

        first_reply.send(Ok("first answer".into())).unwrap();
        next_completion(&mut w).await;
        assert_eq!(w.transcript().indicator_count(), 0);
        assert_eq!(
            rendered(&w),
            vec!["You: first", "Assistant: first answer", "You: second", "Assistant: second answer"]
        );
    }

    #[tokio::test]
    async fn input_resets_for_any_content() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        let mut w = widget(&endpoint);
        for text in ["", "   ", "<script>alert(1)</script>", "a & b"] {
            type_text(&mut w, text);
            w.handle_submit().unwrap();
            assert_eq!(w.input().value(), "");
        }
        assert_eq!(
            rendered(&w),
            vec!["You: ", "You:    ", "You: <script>alert(1)</script>", "You: a & b"]
        );
    }

    #[tokio::test]
    async fn submit_requires_initialize_once() {
        let endpoint: Arc<dyn AskEndpoint> = Arc::new(ScriptedEndpoint::default());
        let mut w = ChatWidget::new(ChatState::default(), endpoint, Handle::current());
        assert_eq!(w.handle_submit(), Err(WidgetError::NotInitialized));
        assert!(w.transcript().entries.is_empty());
        w.initialize().unwrap();
        assert_eq!(w.initialize(), Err(WidgetError::AlreadyInitialized));
    }

    #[tokio::test]
    async fn unknown_token_is_ignored() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        let mut w = widget(&endpoint);
        w.on_response(TurnToken::new(99), Ok("stray".into()));
        assert!(w.transcript().entries.is_empty());
    }

    #[tokio::test]
    async fn poll_responses_applies_arrived_completions() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        let reply = endpoint.expect("ping");
        let mut w = widget(&endpoint);
        type_text(&mut w, "ping");
        w.handle_submit().unwrap();
        assert_eq!(w.poll_responses(), 0);

        reply.send(Ok("pong".into())).unwrap();
        let applied = timeout(Duration::from_secs(2), async {
            loop {
                let n = w.poll_responses();
                if n > 0 {
                    return n;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(applied, 1);
        assert_eq!(rendered(&w), vec!["You: ping", "Assistant: pong"]);
    }
}
