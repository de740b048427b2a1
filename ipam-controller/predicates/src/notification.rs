use std::fmt;

/// A watch notification about one object, or two for updates.
#[derive(Debug)]
pub enum Notification<'a, T> {
    Create(&'a T),
    Delete(&'a T),
    Update { old: &'a T, new: &'a T },
    Generic(&'a T),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Create,
    Delete,
    Update,
    Generic,
}

// === impl Notification ===

impl<'a, T> Notification<'a, T> {
    /// The object a predicate should evaluate: the new object for updates.
    pub fn object(&self) -> &'a T {
        match *self {
            Self::Create(obj) | Self::Delete(obj) | Self::Generic(obj) => obj,
            Self::Update { new, .. } => new,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Create(_) => Category::Create,
            Self::Delete(_) => Category::Delete,
            Self::Update { .. } => Category::Update,
            Self::Generic(_) => Category::Generic,
        }
    }
}

impl<T> Clone for Notification<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Notification<'_, T> {}

// === impl Category ===

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
