// Generic named-state machine
//
// A machine maps state names to factories and owns at most one live state.
// States never hold a reference to their owner: every hook receives the
// owner's data as an explicit context argument.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::engine::RenderContext;

use super::direction::Direction;
use super::error::CoreError;

/// Optional argument handed to `State::enter`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    /// How long a timed state should last, in seconds
    Duration(f32),
    /// Direction to face on entry
    Heading(Direction),
}

/// Transition requested by a state from its `update`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<N> {
    pub to: N,
    pub input: Option<StateInput>,
}

impl<N> Transition<N> {
    pub fn to(name: N) -> Self {
        Self { to: name, input: None }
    }

    pub fn with_input(name: N, input: StateInput) -> Self {
        Self {
            to: name,
            input: Some(input),
        }
    }
}

/// Behaviour unit run by a `StateMachine`. `N` is the machine's state name
/// type, `C` the context the owner lends to each hook.
///
/// Every hook is optional.
pub trait State<N, C> {
    /// Runs once when the state becomes active
    fn enter(&mut self, _ctx: &mut C, _input: Option<StateInput>) -> Result<(), CoreError> {
        Ok(())
    }

    /// Runs every frame while active. Returning a transition makes the
    /// machine switch before `update` returns to its caller.
    fn update(&mut self, _ctx: &mut C, _dt: f32) -> Result<Option<Transition<N>>, CoreError> {
        Ok(None)
    }

    /// Draw state-specific overlays
    fn render(&self, _ctx: &C, _target: &mut dyn RenderContext) {}

    /// Runs once when another state replaces this one
    fn exit(&mut self, _ctx: &mut C) {}
}

/// Builds a fresh state instance for one name
pub type StateFactory<N, C> = Box<dyn Fn() -> Box<dyn State<N, C>>>;

/// Owns one active state out of a set of named factories
pub struct StateMachine<N, C> {
    /// Used in errors and logs ("body", "weapon")
    label: &'static str,
    factories: HashMap<N, StateFactory<N, C>>,
    current: Option<Box<dyn State<N, C>>>,
    current_name: Option<N>,
}

impl<N, C> StateMachine<N, C>
where
    N: Copy + Eq + Hash + fmt::Debug,
{
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            factories: HashMap::new(),
            current: None,
            current_name: None,
        }
    }

    /// Builder form of `register`
    pub fn with_state<F>(mut self, name: N, factory: F) -> Self
    where
        F: Fn() -> Box<dyn State<N, C>> + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Register (or replace) the factory for `name`
    pub fn register<F>(&mut self, name: N, factory: F)
    where
        F: Fn() -> Box<dyn State<N, C>> + 'static,
    {
        self.factories.insert(name, Box::new(factory));
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Name of the active state, `None` before the first `change`
    pub fn current_name(&self) -> Option<N> {
        self.current_name
    }

    /// Check whether `name` is the active state
    pub fn is_in(&self, name: N) -> bool {
        self.current_name == Some(name)
    }

    pub fn has_state(&self, name: N) -> bool {
        self.factories.contains_key(&name)
    }

    /// Replace the active state with a fresh instance of `name`.
    ///
    /// Order: build the new state, `exit` the old one, install the new one,
    /// `enter` it. Unknown names fail and leave the machine untouched.
    pub fn change(
        &mut self,
        name: N,
        ctx: &mut C,
        input: Option<StateInput>,
    ) -> Result<(), CoreError> {
        let factory = self
            .factories
            .get(&name)
            .ok_or_else(|| CoreError::UnknownState {
                machine: self.label,
                state: format!("{:?}", name),
            })?;
        let next = factory();

        if let Some(mut previous) = self.current.take() {
            previous.exit(ctx);
        }

        log::debug!(
            "{} machine: {:?} -> {:?}",
            self.label,
            self.current_name,
            name
        );

        self.current_name = Some(name);
        let state = self.current.insert(next);
        state.enter(ctx, input)
    }

    /// Update the active state and apply any transition it asks for
    pub fn update(&mut self, ctx: &mut C, dt: f32) -> Result<(), CoreError> {
        let Some(state) = self.current.as_mut() else {
            return Ok(());
        };

        if let Some(transition) = state.update(ctx, dt)? {
            self.change(transition.to, ctx, transition.input)?;
        }

        Ok(())
    }

    pub fn render(&self, ctx: &C, target: &mut dyn RenderContext) {
        if let Some(state) = &self.current {
            state.render(ctx, target);
        }
    }
}

impl<N: fmt::Debug, C> fmt::Debug for StateMachine<N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("label", &self.label)
            .field("states", &self.factories.keys().collect::<Vec<_>>())
            .field("current", &self.current_name)
            .finish()
    }
}
