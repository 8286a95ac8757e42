use crate::di::Container;
use std::sync::Arc;

/// Builder for constructing a service container
///
/// Use this to configure and register services before handing the container out.
///
/// # Example
/// ```
/// use meshestra_exceptions::{ContainerBuilder, ExceptionHandler, Handler};
/// use std::sync::Arc;
///
/// let container = ContainerBuilder::new()
///     .instance::<dyn ExceptionHandler>(Arc::new(Handler::default()))
///     .build();
/// assert!(container.contains::<dyn ExceptionHandler>());
/// ```
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            container: Container::new(),
        }
    }

    /// Register a service instance
    pub fn register<T: 'static + Send + Sync>(self, instance: T) -> Self {
        self.container.register(instance);
        self
    }

    /// Bind a shared instance, which may be a trait object
    pub fn instance<T: ?Sized + 'static + Send + Sync>(self, instance: Arc<T>) -> Self {
        self.container.instance(instance);
        self
    }

    /// Build the container
    pub fn build(self) -> Container {
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
