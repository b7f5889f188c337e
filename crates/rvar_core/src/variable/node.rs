//! Type-erased computation graph and its iterative interpreter.
//!
//! A random variable is a tree of [`Node`]s. Binds are stored as a `Then`
//! node holding the upstream computation and a [`Frame`]; evaluation walks
//! the tree with an explicit frame stack instead of the native call stack,
//! so left-nested chains of any length run in constant stack depth. After
//! an effect step the interpreter resumes through [`Effect::tail_rec_m`],
//! so chains of effect steps are flat as well.
//!
//! Values cross node boundaries as `Box<dyn Any>` and are recovered by
//! [`unerase`] at the typed API boundary in the parent module.

use std::any::Any;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::context::ExtensibleContext;
use crate::effect::Effect;

pub(crate) type Erased = Box<dyn Any>;

/// Final state, final context and value of a run.
type Finished<S> = (S, ExtensibleContext, Erased);

/// Outcome of running a node graph inside the effect.
pub(crate) type Outcome<F, S> = <F as Effect>::Wrapped<Finished<S>>;

type PureFn = Box<dyn Fn() -> Erased>;
type StateFn<S> = Box<dyn Fn(S, &mut ExtensibleContext) -> (S, Erased)>;
type EffectFn<F, S> = Box<dyn Fn(S, ExtensibleContext) -> Outcome<F, S>>;

/// Pending continuation applied to an upstream value.
pub(crate) enum Frame<F: Effect, S: 'static> {
    /// Pure transformation of the value.
    Map(Rc<dyn Fn(Erased) -> Erased>),
    /// Continuation producing the next computation.
    Bind(Rc<dyn Fn(Erased) -> Rc<Node<F, S>>>),
}

impl<F: Effect, S: 'static> Clone for Frame<F, S> {
    fn clone(&self) -> Self {
        match self {
            Self::Map(f) => Self::Map(Rc::clone(f)),
            Self::Bind(k) => Self::Bind(Rc::clone(k)),
        }
    }
}

enum NodeKind<F: Effect, S: 'static> {
    /// Constant value; ignores state and context.
    Pure(PureFn),
    /// Effect-free step over the state and context.
    State(StateFn<S>),
    /// Step that runs inside the effect.
    Effect(EffectFn<F, S>),
    /// Upstream computation followed by a continuation.
    Then(Rc<Node<F, S>>, Frame<F, S>),
}

/// One vertex of the computation graph.
///
/// The kind is only `None` once the node has been handed to the drop queue.
pub(crate) struct Node<F: Effect, S: 'static> {
    kind: Option<NodeKind<F, S>>,
}

impl<F: Effect, S: 'static> Node<F, S> {
    fn new(kind: NodeKind<F, S>) -> Self {
        Self { kind: Some(kind) }
    }

    pub(crate) fn pure(make: impl Fn() -> Erased + 'static) -> Self {
        Self::new(NodeKind::Pure(Box::new(make)))
    }

    pub(crate) fn state(step: impl Fn(S, &mut ExtensibleContext) -> (S, Erased) + 'static) -> Self {
        Self::new(NodeKind::State(Box::new(step)))
    }

    pub(crate) fn effect(run: impl Fn(S, ExtensibleContext) -> Outcome<F, S> + 'static) -> Self {
        Self::new(NodeKind::Effect(Box::new(run)))
    }

    pub(crate) fn then(source: Rc<Node<F, S>>, frame: Frame<F, S>) -> Self {
        Self::new(NodeKind::Then(source, frame))
    }
}

// Graph edges live both in `Then` sources and inside closures that capture
// other variables, so a derived drop recurses once per edge. Every node
// instead hands its contents to a thread-local queue that the outermost
// drop drains in a loop.
impl<F: Effect, S: 'static> Drop for Node<F, S> {
    fn drop(&mut self) {
        if let Some(kind) = self.kind.take() {
            drop_queue::defer(Box::new(kind));
        }
    }
}

mod drop_queue {
    use super::*;

    #[derive(Default)]
    struct Queue {
        draining: bool,
        pending: Vec<Box<dyn Any>>,
    }

    thread_local! {
        static QUEUE: RefCell<Queue> = RefCell::new(Queue::default());
    }

    /// Drops `contents` without growing the native stack per nested node.
    pub(super) fn defer(contents: Box<dyn Any>) {
        let enqueued = QUEUE.try_with(|queue| {
            let mut queue = queue.borrow_mut();
            queue.pending.push(contents);
            !std::mem::replace(&mut queue.draining, true)
        });
        match enqueued {
            Ok(true) => drain(),
            Ok(false) => {}
            // Thread teardown: the queue is gone and `contents` was dropped
            // with the closure argument.
            Err(_) => {}
        }
    }

    fn drain() {
        struct Reset;
        impl Drop for Reset {
            fn drop(&mut self) {
                let _ = QUEUE.try_with(|queue| queue.borrow_mut().draining = false);
            }
        }
        let _reset = Reset;

        // Each item is dropped outside the borrow; nested node drops only
        // push onto the queue.
        while let Some(item) = QUEUE.with(|queue| queue.borrow_mut().pending.pop()) {
            drop(item);
        }
    }
}

/// Recovers a concrete value from an erased one.
///
/// The typed API only ever pairs an erased value with the type it was
/// erased from, so a failed downcast is a kernel bug.
pub(crate) fn unerase<A: 'static>(value: Erased) -> A {
    match value.downcast::<A>() {
        Ok(value) => *value,
        Err(_) => unreachable!(
            "erased value is not a {}; random variable graph is corrupt",
            std::any::type_name::<A>()
        ),
    }
}

enum Cursor<F: Effect, S: 'static> {
    Eval(Rc<Node<F, S>>),
    Return(Erased),
}

/// Interpreter registers between effect steps.
struct Machine<F: Effect, S: 'static> {
    cursor: Cursor<F, S>,
    state: S,
    ctx: ExtensibleContext,
    frames: Vec<Frame<F, S>>,
}

/// Runs a node graph from `state` and `ctx`.
pub(crate) fn interpret<F: Effect, S: 'static>(
    root: Rc<Node<F, S>>,
    state: S,
    ctx: ExtensibleContext,
) -> Outcome<F, S> {
    let machine = Machine {
        cursor: Cursor::Eval(root),
        state,
        ctx,
        frames: Vec::new(),
    };
    F::tail_rec_m::<Machine<F, S>, Finished<S>, _>(machine, resume::<F, S>)
}

/// Runs until the graph finishes or suspends on an effect step.
fn resume<F: Effect, S: 'static>(
    machine: Machine<F, S>,
) -> F::Wrapped<ControlFlow<Finished<S>, Machine<F, S>>> {
    let Machine {
        mut cursor,
        mut state,
        mut ctx,
        mut frames,
    } = machine;

    loop {
        cursor = match cursor {
            Cursor::Eval(node) => {
                let kind = match &node.kind {
                    Some(kind) => kind,
                    None => unreachable!("evaluated a node that is being dropped"),
                };
                let next = match kind {
                    NodeKind::Then(source, frame) => {
                        frames.push(frame.clone());
                        Cursor::Eval(Rc::clone(source))
                    }
                    NodeKind::Pure(make) => Cursor::Return(make()),
                    NodeKind::State(step) => {
                        let (advanced, value) = step(state, &mut ctx);
                        state = advanced;
                        Cursor::Return(value)
                    }
                    NodeKind::Effect(run) => {
                        let suspended = run(state, ctx);
                        return F::map::<Finished<S>, ControlFlow<Finished<S>, Machine<F, S>>, _>(
                            suspended,
                            move |(state, ctx, value)| {
                                ControlFlow::Continue(Machine {
                                    cursor: Cursor::Return(value),
                                    state,
                                    ctx,
                                    frames,
                                })
                            },
                        );
                    }
                };
                next
            }
            Cursor::Return(value) => match frames.pop() {
                Some(Frame::Map(f)) => Cursor::Return(f(value)),
                Some(Frame::Bind(k)) => Cursor::Eval(k(value)),
                None => return F::pure(ControlFlow::Break((state, ctx, value))),
            },
        };
    }
}
