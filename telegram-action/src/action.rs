//! Turns plain async functions into update handlers.
//!
//! Any `async fn` whose parameters all implement [`FromActionContext`] is an [`Action`]. The
//! parameters are extracted from the context of each update, then the function is called.
//! [`TelegramAction`] is the patched form: it logs the update, builds the context and invokes.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use fbot_core::{Bot, FbotError, Handler, HandlerResponse, Result, Update};
use tracing::instrument;

use crate::chat_data::ChatStore;
use crate::context::ActionContext;
use crate::event_log::log_incoming;
use crate::extract::FromActionContext;

pub type ActionFuture = Pin<Box<dyn Future<Output = Result<HandlerResponse>> + Send>>;

/// An async function callable with parameters drawn from an [`ActionContext`].
///
/// `Args` is the tuple of parameter types; it only serves to keep the per-arity impls apart.
pub trait Action<Args>: Clone + Send + Sync + 'static {
    fn call(&self, ctx: &ActionContext) -> ActionFuture;
}

macro_rules! impl_action {
    ( $($ty:ident),* ) => {
        #[allow(non_snake_case, unused_variables)]
        impl<F, Fut, $($ty,)*> Action<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> Fut + Clone + Send + Sync + 'static,
            Fut: Future<Output = Result<HandlerResponse>> + Send + 'static,
            $( $ty: FromActionContext + Send + 'static, )*
        {
            fn call(&self, ctx: &ActionContext) -> ActionFuture {
                $(
                    let $ty = match $ty::from_context(ctx) {
                        Ok(value) => value,
                        Err(e) => return Box::pin(std::future::ready(Err(FbotError::from(e)))),
                    };
                )*
                Box::pin((self)($($ty),*))
            }
        }
    };
}

impl_action!();
impl_action!(T1);
impl_action!(T1, T2);
impl_action!(T1, T2, T3);
impl_action!(T1, T2, T3, T4);
impl_action!(T1, T2, T3, T4, T5);
impl_action!(T1, T2, T3, T4, T5, T6);
impl_action!(T1, T2, T3, T4, T5, T6, T7);
impl_action!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_action!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_action!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_action!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_action!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);

trait ErasedAction: Send + Sync {
    fn call(&self, ctx: &ActionContext) -> ActionFuture;
}

struct Erased<A, Args> {
    action: A,
    _args: PhantomData<fn() -> Args>,
}

impl<A, Args> ErasedAction for Erased<A, Args>
where
    A: Action<Args>,
    Args: 'static,
{
    fn call(&self, ctx: &ActionContext) -> ActionFuture {
        self.action.call(ctx)
    }
}

/// Type-erased [`Action`].
#[derive(Clone)]
pub struct BoxedAction(Arc<dyn ErasedAction>);

impl BoxedAction {
    pub fn new<A, Args>(action: A) -> Self
    where
        A: Action<Args>,
        Args: 'static,
    {
        Self(Arc::new(Erased {
            action,
            _args: PhantomData,
        }))
    }

    pub fn call(&self, ctx: &ActionContext) -> ActionFuture {
        self.0.call(ctx)
    }
}

/// An action wired to the transport and chat state; usable as a chain [`Handler`].
#[derive(Clone)]
pub struct TelegramAction {
    name: &'static str,
    bot: Arc<dyn Bot>,
    chats: ChatStore,
    action: BoxedAction,
}

/// Wraps `action` so it runs on incoming updates with its declared parameters injected.
pub fn patch_telegram_action<A, Args>(
    bot: Arc<dyn Bot>,
    chats: ChatStore,
    action: A,
) -> TelegramAction
where
    A: Action<Args>,
    Args: 'static,
{
    TelegramAction {
        name: std::any::type_name::<A>(),
        bot,
        chats,
        action: BoxedAction::new(action),
    }
}

impl TelegramAction {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the action on an already-built context, without logging the update again.
    pub async fn call(&self, ctx: &ActionContext) -> Result<HandlerResponse> {
        self.action.call(ctx).await
    }
}

#[async_trait]
impl Handler for TelegramAction {
    #[instrument(skip(self, update), fields(action = self.name, update_id = update.id))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        log_incoming(update);
        let ctx = ActionContext::from_update(self.bot.clone(), &self.chats, update.clone()).await?;
        self.action.call(&ctx).await
    }
}
