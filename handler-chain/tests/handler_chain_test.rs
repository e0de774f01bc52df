//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after bookkeeping, a before hook stopping the chain, Reply ending the handle phase
//! and reaching after hooks, Ignore falling through, and ordering (before first→last, after last→first).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chatgate_core::{Chat, Handler, HandlerResponse, Message, User};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        message_type: "text".to_string(),
    }
}

/// Records every hook invocation as "<phase>_<name>".
struct RecordingHandler {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    before_result: bool,
    response: HandlerResponse,
}

impl RecordingHandler {
    fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>, response: HandlerResponse) -> Self {
        Self {
            name,
            log,
            before_result: true,
            response,
        }
    }

    fn blocking(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            before_result: false,
            ..Self::new(name, log, HandlerResponse::Continue)
        }
    }
}

#[async_trait]
impl Handler for RecordingHandler {
    async fn before(&self, _message: &Message) -> chatgate_core::Result<bool> {
        self.log.lock().unwrap().push(format!("before_{}", self.name));
        Ok(self.before_result)
    }

    async fn handle(&self, _message: &Message) -> chatgate_core::Result<HandlerResponse> {
        self.log.lock().unwrap().push(format!("handle_{}", self.name));
        Ok(self.response.clone())
    }

    async fn after(
        &self,
        _message: &Message,
        response: &HandlerResponse,
    ) -> chatgate_core::Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("after_{}:{:?}", self.name, response));
        Ok(())
    }
}

/// **Test: An empty chain returns Continue.**
#[tokio::test]
async fn test_empty_chain_continues() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let result = chain.handle(&create_test_message("hi")).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
}

/// **Test: Hooks run before (in order), handle (in order), after (reverse).**
///
/// **Expected:** both handlers continue, so both handle phases run and after sees Continue.
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::new(
            "first",
            log.clone(),
            HandlerResponse::Continue,
        )))
        .add_handler(Arc::new(RecordingHandler::new(
            "second",
            log.clone(),
            HandlerResponse::Continue,
        )));
    assert_eq!(chain.len(), 2);

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "before_first",
            "before_second",
            "handle_first",
            "handle_second",
            "after_second:Continue",
            "after_first:Continue",
        ]
    );
}

/// **Test: A before hook returning false stops the chain; no handle or after runs.**
#[tokio::test]
async fn test_before_false_stops_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::blocking("gate", log.clone())))
        .add_handler(Arc::new(RecordingHandler::new(
            "worker",
            log.clone(),
            HandlerResponse::Continue,
        )));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(*log.lock().unwrap(), vec!["before_gate"]);
}

/// **Test: Reply ends the handle phase and is passed to every after hook.**
#[tokio::test]
async fn test_reply_stops_chain_and_passes_to_after() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::new(
            "replier",
            log.clone(),
            HandlerResponse::Reply("AI reply.".to_string()),
        )))
        .add_handler(Arc::new(RecordingHandler::new(
            "unreached",
            log.clone(),
            HandlerResponse::Continue,
        )));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("AI reply.".to_string()));
    let log = log.lock().unwrap();
    assert!(!log.contains(&"handle_unreached".to_string()));
    assert_eq!(
        log.last().map(String::as_str),
        Some("after_replier:Reply(\"AI reply.\")")
    );
}

/// **Test: Ignore falls through to the next handler.**
#[tokio::test]
async fn test_ignore_tries_next_handler() {
    let handle_count = Arc::new(AtomicUsize::new(0));

    struct CountingStop(Arc<AtomicUsize>);

    #[async_trait]
    impl Handler for CountingStop {
        async fn handle(&self, _message: &Message) -> chatgate_core::Result<HandlerResponse> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(HandlerResponse::Stop)
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::new(
            "skipper",
            log,
            HandlerResponse::Ignore,
        )))
        .add_handler(Arc::new(CountingStop(handle_count.clone())));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 1);
}
