use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Static descriptor of an error kind.
///
/// A kind is identified by the Rust type it was declared for, and may name a parent
/// kind. `is_a` follows the parent chain, which gives kind assertions the usual
/// polymorphic behaviour: asserting on `RuntimeError` also matches its subkinds.
#[derive(Clone, Copy)]
pub struct Kind {
    name: &'static str,
    type_id: fn() -> TypeId,
    parent: Option<&'static Kind>,
}

impl Kind {
    pub const fn new<E: ?Sized + 'static>(name: &'static str, parent: Option<&'static Kind>) -> Self {
        Self {
            name,
            type_id: TypeId::of::<E>,
            parent,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static Kind> {
        self.parent
    }

    /// Whether this kind is `ancestor` or descends from it
    pub fn is_a(&self, ancestor: &Kind) -> bool {
        self.ancestry().any(|kind| kind == ancestor)
    }

    /// This kind followed by each of its parents, nearest first
    pub fn ancestry(&self) -> impl Iterator<Item = &Kind> {
        std::iter::successors(Some(self), |kind| kind.parent)
    }

    fn id(&self) -> TypeId {
        (self.type_id)()
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kind")
            .field("name", &self.name)
            .field("parent", &self.parent.map(Kind::name))
            .finish()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An error type that can be reported through the exception handler.
///
/// Usually derived with `#[derive(Exception)]`.
pub trait Exception: std::error::Error + Send + Sync + 'static {
    const KIND: &'static Kind;
}

/// The kind of `E`
pub fn kind_of<E: Exception>() -> &'static Kind {
    E::KIND
}
