//! Polymorphic resource values.
//!
//! A [`Value`] is what a (name, config) binding points at: either a scalar [`Item`] or a
//! compound collection ([`Plural`], [`Array`]). The hierarchy is a closed sum type so the
//! codec's serialization match is exhaustive; adding a new kind is a compile-time-checked
//! exercise rather than a virtual-dispatch convention.
//!
//! Every value carries a weak flag and an optional [`Source`] attribution. A weak value is
//! a placeholder (for example an id auto-synthesized from a reference) that is expected to
//! be superseded by a real definition before the table is final; the table's duplicate
//! handling treats weak slots as replaceable.

use strum::EnumCount;

use crate::model::{id::ResourceId, name::ResourceName, pool::PoolRef, source::Source};

/// A scalar resource value.
///
/// String-bearing variants hold [`PoolRef`] handles into the owning table's string pool
/// rather than inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A pooled string value
    String(PoolRef),
    /// A reference to a compiled file, as a pooled path string
    FileReference(PoolRef),
    /// A reference to another resource by name, optionally resolved to an id
    Reference {
        /// The referenced resource name
        name: ResourceName,
        /// The referenced numeric id, once known
        id: Option<ResourceId>,
    },
    /// A bare id symbol with no content of its own
    Id,
    /// A raw typed primitive (bools, integers, dimensions, colors)
    Primitive {
        /// Type discriminator byte of the runtime value representation
        data_type: u8,
        /// The 32-bit payload
        data: u32,
    },
}

/// The quantity classes a [`Plural`] can populate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u32)]
pub enum PluralCategory {
    /// Quantity class `zero`
    Zero = 0,
    /// Quantity class `one`
    One = 1,
    /// Quantity class `two`
    Two = 2,
    /// Quantity class `few`
    Few = 3,
    /// Quantity class `many`
    Many = 4,
    /// Fallback quantity class `other`
    Other = 5,
}

/// A quantity-dependent collection with one optional [`Item`] slot per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plural {
    values: [Option<Item>; PluralCategory::COUNT],
}

impl Plural {
    /// Create a plural with all category slots empty.
    #[must_use]
    pub fn new() -> Self {
        Plural::default()
    }

    /// Populate a category slot, replacing any previous item.
    pub fn set(&mut self, category: PluralCategory, item: Item) {
        self.values[category as usize] = Some(item);
    }

    /// The item bound to `category`, if any.
    #[must_use]
    pub fn get(&self, category: PluralCategory) -> Option<&Item> {
        self.values[category as usize].as_ref()
    }

    /// Iterate the populated (category, item) slots in category order.
    pub fn iter(&self) -> impl Iterator<Item = (PluralCategory, &Item)> {
        self.values.iter().enumerate().filter_map(|(i, slot)| {
            // Slot indices come from the category repr, conversion back cannot fail
            #[allow(clippy::cast_possible_truncation)]
            let category = PluralCategory::from_repr(i as u32)?;
            slot.as_ref().map(|item| (category, item))
        })
    }

    /// Returns true if no category slot is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// An ordered collection of scalar items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    /// The items in declaration order
    pub items: Vec<Item>,
}

/// The kind axis of a [`Value`]: scalar item or compound collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// A scalar item
    Item(Item),
    /// A quantity-keyed collection
    Plural(Plural),
    /// An ordered item collection
    Array(Array),
}

/// A configuration-qualified resource value with weakness and attribution.
///
/// # Examples
///
/// ```rust
/// use restable::model::{Item, Value};
///
/// let id = Value::id();
/// assert!(id.is_weak());
///
/// let strong = Value::item(Item::Primitive { data_type: 0x10, data: 42 });
/// assert!(!strong.is_weak());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    /// The value payload
    pub kind: ValueKind,
    /// Placeholder flag: weak definitions may be superseded without conflict
    pub weak: bool,
    /// Attribution for diagnostics, not interpreted by the core
    pub source: Option<Source>,
}

impl Value {
    /// Create a strong value from a kind.
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        Value {
            kind,
            weak: false,
            source: None,
        }
    }

    /// Create a strong scalar value.
    #[must_use]
    pub fn item(item: Item) -> Self {
        Value::new(ValueKind::Item(item))
    }

    /// Create a weak placeholder value from a kind.
    #[must_use]
    pub fn weak(kind: ValueKind) -> Self {
        Value {
            kind,
            weak: true,
            source: None,
        }
    }

    /// Create an id symbol value.
    ///
    /// Ids start out weak: they are routinely synthesized from `@+id/...` references and
    /// replaced when an explicit declaration shows up.
    #[must_use]
    pub fn id() -> Self {
        Value::weak(ValueKind::Item(Item::Id))
    }

    /// Attach source attribution.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns true if this value is a weak placeholder.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Content equality, ignoring source attribution.
    ///
    /// The duplicate-definition check compares content only; where a value was declared
    /// does not make it a different value.
    #[must_use]
    pub fn content_eq(&self, other: &Value) -> bool {
        self.kind == other.kind && self.weak == other.weak
    }
}
