//! # Handler chain
//!
//! Runs a sequence of handlers for each update. A handler's `before` can stop the chain; the first
//! handler that returns Stop ends the handle phase; `after` callbacks run in reverse order.
//! [`filters`] wraps handlers so they only apply to certain commands, callbacks or plain text.

pub mod filters;

use fbot_core::{Handler, HandlerResponse, Result, Update};
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub use filters::{OnCallback, OnCommand, OnText};

/// Ordered handlers: before runs first→last, handle until Stop, after runs last→first.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler (runs in order; first Stop ends the handle phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs all before, then handle until Stop, then all after in reverse. Returns Stop or Continue.
    #[instrument(skip(self, update), fields(update_id = update.id))]
    pub async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;
        let user_id = update.effective_user().map(|u| u.id);
        let chat_id = update.effective_chat().map(|c| c.id);

        info!(
            user_id = ?user_id,
            chat_id = ?chat_id,
            kind = %update.kind_name(),
            "step: handler_chain started"
        );

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            if !handler.before(update).await? {
                info!(
                    user_id = ?user_id,
                    handler = %handler_name,
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(update).await?;
            debug!(
                handler = %handler_name,
                response = ?response,
                "Handler processed"
            );

            match response {
                HandlerResponse::Stop => {
                    info!(
                        user_id = ?user_id,
                        handler = %handler_name,
                        "step: handler chain stopped by handler"
                    );
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(update, &final_response).await?;
        }

        info!(
            user_id = ?user_id,
            chat_id = ?chat_id,
            response = ?final_response,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

// Integration tests live in tests/handler_chain_test.rs
