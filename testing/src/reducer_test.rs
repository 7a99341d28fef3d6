//! Given-When-Then harness for screen reducers
//!
//! A screen reducer answers an intent with at most one request effect, and the
//! completion of that request comes back as a generation-stamped action. The
//! harness checks both halves: [`ReducerTest::run`] stops after the intents,
//! [`ReducerTest::run_with_feedback`] also executes the returned effects and
//! reduces the completions they produce.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use crate::run_effects;
use culinary_blog_core::{effect::Effect, reducer::Reducer};

/// One deferred check, run after the reducer has been driven.
enum Check<S, A> {
    State(Box<dyn FnOnce(&S)>),
    Effects(Box<dyn FnOnce(&[Effect<A>])>),
    Feedback(Box<dyn FnOnce(&[A])>),
}

/// Fluent reducer test
///
/// # Example
///
/// ```ignore
/// use culinary_blog_testing::{ReducerTest, assertions};
///
/// ReducerTest::new(FeedReducer::new())
///     .with_env(MockEnvironment::mock(posts, auth))
///     .given_state(FeedState::default())
///     .when_action(FeedAction::Load)
///     .then_effects(assertions::assert_one_request)
///     .then_feedback(|actions| assert_eq!(actions.len(), 1))
///     .then_state(|state| assert!(state.visible_posts().is_empty()))
///     .run_with_feedback()
///     .await;
/// ```
pub struct ReducerTest<R: Reducer> {
    reducer: R,
    environment: Option<R::Environment>,
    state: Option<R::State>,
    intents: Vec<R::Action>,
    checks: Vec<Check<R::State, R::Action>>,
}

impl<R: Reducer> ReducerTest<R> {
    /// Start a test of `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            state: None,
            intents: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Repositories and storage the reducer sees
    #[must_use]
    pub fn with_env(mut self, env: R::Environment) -> Self {
        self.environment = Some(env);
        self
    }

    /// Screen state before the first action (Given)
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.state = Some(state);
        self
    }

    /// Reduce an action (When)
    ///
    /// Actions are reduced in the order given. Intents and hand-written
    /// completions can be mixed; effect checks see the effects of the last one.
    #[must_use]
    pub fn when_action(mut self, action: R::Action) -> Self {
        self.intents.push(action);
        self
    }

    /// Check the final state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&R::State) + 'static,
    {
        self.checks.push(Check::State(Box::new(check)));
        self
    }

    /// Check the effects returned for the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<R::Action>]) + 'static,
    {
        self.checks.push(Check::Effects(Box::new(check)));
        self
    }

    /// Check the completions produced by those effects (Then)
    ///
    /// Only meaningful with [`ReducerTest::run_with_feedback`].
    #[must_use]
    pub fn then_feedback<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[R::Action]) + 'static,
    {
        self.checks.push(Check::Feedback(Box::new(check)));
        self
    }

    /// Reduce the actions and run every check, without executing effects
    ///
    /// # Panics
    ///
    /// Panics if the state, environment or actions are missing, if a check
    /// fails, or if a feedback check was registered.
    pub fn run(self) {
        let (reducer, env, state, effects, checks) = self.reduce_intents();
        assert!(
            !checks.iter().any(|check| matches!(check, Check::Feedback(_))),
            "then_feedback() needs run_with_feedback()"
        );
        drop((reducer, env));
        Self::check(checks, &state, &effects, &[]);
    }

    /// Reduce the actions, execute the last action's effects, reduce the
    /// completions they produce, then run the state and feedback checks
    ///
    /// Effect checks run before the effects are executed. Effects returned
    /// while reducing the completions are not executed.
    ///
    /// # Panics
    ///
    /// Panics if the state, environment or actions are missing, or if a
    /// check fails.
    pub async fn run_with_feedback(self)
    where
        R::Action: Clone,
    {
        let (reducer, env, mut state, effects, checks) = self.reduce_intents();

        let (effect_checks, checks): (Vec<_>, Vec<_>) = checks
            .into_iter()
            .partition(|check| matches!(check, Check::Effects(_)));
        Self::check(effect_checks, &state, &effects, &[]);

        let feedback = run_effects(effects).await;
        for action in &feedback {
            let _ = reducer.reduce(&mut state, action.clone(), &env);
        }

        Self::check(checks, &state, &[], &feedback);
    }

    #[allow(clippy::expect_used, clippy::panic, clippy::type_complexity)] // Test harness
    fn reduce_intents(
        self,
    ) -> (
        R,
        R::Environment,
        R::State,
        Vec<Effect<R::Action>>,
        Vec<Check<R::State, R::Action>>,
    ) {
        let mut state = self
            .state
            .expect("Initial state must be set with given_state()");
        let env = self
            .environment
            .expect("Environment must be set with with_env()");
        assert!(
            !self.intents.is_empty(),
            "Action must be set with when_action()"
        );

        let mut effects = Vec::new();
        for action in self.intents {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }
        (self.reducer, env, state, effects, self.checks)
    }

    fn check(
        checks: Vec<Check<R::State, R::Action>>,
        state: &R::State,
        effects: &[Effect<R::Action>],
        feedback: &[R::Action],
    ) {
        for check in checks {
            match check {
                Check::State(check) => check(state),
                Check::Effects(check) => check(effects),
                Check::Feedback(check) => check(feedback),
            }
        }
    }
}

/// Checks for effects and completions
pub mod assertions {
    use culinary_blog_core::{effect::Effect, generation::Generation};

    fn request_count<A>(effects: &[Effect<A>]) -> usize {
        effects
            .iter()
            .map(|effect| match effect {
                Effect::None => 0,
                Effect::Future(_) => 1,
                Effect::Parallel(nested) => request_count(nested),
            })
            .sum()
    }

    /// The step touched local state only
    ///
    /// # Panics
    ///
    /// Panics if any effect would do work when executed.
    pub fn assert_no_effects<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no work, found {} request(s)",
            request_count(effects)
        );
    }

    /// The step started at least one request
    ///
    /// # Panics
    ///
    /// Panics if no effect is a future.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(request_count(effects) > 0, "Expected a request, found none");
    }

    /// The step started exactly one request
    ///
    /// # Panics
    ///
    /// Panics unless exactly one future is returned, counting nested ones.
    pub fn assert_one_request<A>(effects: &[Effect<A>]) {
        let count = request_count(effects);
        assert_eq!(count, 1, "Expected exactly one request, found {count}");
    }

    /// Every completion carries the `expected` generation
    ///
    /// `stamp` reads the generation out of a completion action and returns
    /// `None` for actions that are not completions.
    ///
    /// # Panics
    ///
    /// Panics if there are no completions or any carries another generation.
    pub fn assert_stamped<A, F>(actions: &[A], expected: Generation, stamp: F)
    where
        F: Fn(&A) -> Option<Generation>,
    {
        let stamps: Vec<Option<Generation>> = actions.iter().map(stamp).collect();
        assert!(!stamps.is_empty(), "Expected a completion, found none");
        for found in stamps {
            assert_eq!(
                found,
                Some(expected),
                "Completion stamped with the wrong generation"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use culinary_blog_core::{
        generation::{Generation, RequestGeneration},
        smallvec, SmallVec,
    };

    #[derive(Clone, Debug, Default)]
    struct Lookup {
        requests: RequestGeneration,
        names: Vec<String>,
        loading: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum LookupAction {
        Search,
        Found { generation: Generation, names: Vec<String> },
        Forget,
    }

    impl LookupAction {
        const fn stamp(&self) -> Option<Generation> {
            match self {
                Self::Found { generation, .. } => Some(*generation),
                _ => None,
            }
        }
    }

    struct LookupReducer;

    impl Reducer for LookupReducer {
        type State = Lookup;
        type Action = LookupAction;
        type Environment = Vec<String>;

        fn reduce(
            &self,
            state: &mut Lookup,
            action: LookupAction,
            env: &Vec<String>,
        ) -> SmallVec<[Effect<LookupAction>; 4]> {
            match action {
                LookupAction::Search => {
                    let generation = state.requests.issue();
                    state.loading = true;
                    let names = env.clone();
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(LookupAction::Found { generation, names })
                    }))]
                },
                LookupAction::Found { generation, names } => {
                    if state.requests.is_current(generation) {
                        state.loading = false;
                        state.names = names;
                    }
                    smallvec![Effect::None]
                },
                LookupAction::Forget => {
                    state.names.clear();
                    smallvec![Effect::None]
                },
            }
        }
    }

    fn names() -> Vec<String> {
        vec!["Basil".to_string(), "Thyme".to_string()]
    }

    #[test]
    fn test_intent_leaves_request_in_flight() {
        ReducerTest::new(LookupReducer)
            .with_env(names())
            .given_state(Lookup::default())
            .when_action(LookupAction::Search)
            .then_state(|state| {
                assert!(state.loading);
                assert!(state.names.is_empty());
            })
            .then_effects(assertions::assert_one_request)
            .run();
    }

    #[test]
    fn test_hand_written_stale_completion_is_ignored() {
        ReducerTest::new(LookupReducer)
            .with_env(names())
            .given_state(Lookup::default())
            .when_action(LookupAction::Search)
            .when_action(LookupAction::Search)
            .when_action(LookupAction::Found {
                generation: Generation::new(1),
                names: vec!["Stale".to_string()],
            })
            .then_state(|state| {
                assert!(state.loading);
                assert!(state.names.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn test_feedback_is_reduced_and_stamped() {
        ReducerTest::new(LookupReducer)
            .with_env(names())
            .given_state(Lookup::default())
            .when_action(LookupAction::Search)
            .when_action(LookupAction::Search)
            .then_effects(assertions::assert_one_request)
            .then_feedback(|actions| {
                assertions::assert_stamped(actions, Generation::new(2), LookupAction::stamp);
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.names, names());
            })
            .run_with_feedback()
            .await;
    }

    #[tokio::test]
    async fn test_local_step_produces_no_feedback() {
        ReducerTest::new(LookupReducer)
            .with_env(names())
            .given_state(Lookup {
                names: names(),
                ..Lookup::default()
            })
            .when_action(LookupAction::Forget)
            .then_feedback(|actions| assert!(actions.is_empty()))
            .then_state(|state| assert!(state.names.is_empty()))
            .run_with_feedback()
            .await;
    }

    #[test]
    #[should_panic(expected = "needs run_with_feedback")]
    fn test_feedback_check_requires_async_run() {
        ReducerTest::new(LookupReducer)
            .with_env(names())
            .given_state(Lookup::default())
            .when_action(LookupAction::Search)
            .then_feedback(|_| {})
            .run();
    }

    #[test]
    fn test_nested_requests_are_counted() {
        let effects: Vec<Effect<LookupAction>> = vec![Effect::Parallel(vec![
            Effect::None,
            Effect::Future(Box::pin(async { None })),
        ])];
        assertions::assert_one_request(&effects);
        assertions::assert_has_future_effect(&effects);
    }

    #[test]
    #[should_panic(expected = "Expected exactly one request")]
    fn test_two_requests_fail_one_request_check() {
        let effects: Vec<Effect<LookupAction>> = vec![
            Effect::Future(Box::pin(async { None })),
            Effect::Future(Box::pin(async { None })),
        ];
        assertions::assert_one_request(&effects);
    }

    #[test]
    #[should_panic(expected = "wrong generation")]
    fn test_stale_stamp_fails() {
        let actions = vec![LookupAction::Found {
            generation: Generation::new(1),
            names: Vec::new(),
        }];
        assertions::assert_stamped(&actions, Generation::new(2), LookupAction::stamp);
    }
}
