//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block is wrapped in `async move`, so captured repositories must be
/// cloned before the macro is invoked.
///
/// # Example
///
/// ```rust,ignore
/// use culinary_blog_core::async_effect;
///
/// let repository = env.repository.clone();
/// async_effect! {
///     let result = repository.published_posts().await;
///     Some(FeedAction::PostsLoaded { generation, result })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Loaded { value: i32 },
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::Loaded { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_async_effect_macro_output() {
        let value = 7;
        let effect = async_effect! {
            Some(TestAction::Loaded { value })
        };

        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds a future");
        };
        let action = tokio_test::block_on(fut);
        assert_eq!(action, Some(TestAction::Loaded { value: 7 }));
    }
}
