//! Record descriptors
//!
//! A record is described once, up front, by an ordered table of [`Field`]s.
//! The mapper never inspects types at runtime; everything it needs (member
//! name, visibility, exclusion, force-include, former names, and typed
//! accessors) lives in the table.
//!
//! ## Member Selection
//!
//! | Visibility | encoded            | decoded            |
//! |------------|--------------------|--------------------|
//! | `Public`   | yes                | yes                |
//! | `ReadOnly` | yes                | only force-include |
//! | `Private`  | only force-include | only force-include |
//!
//! `exclude` wins over everything: an excluded member is never encoded and
//! never assigned on decode.

use crate::mapper::Mapper;
use sbf_core::{Result, Value};
use std::fmt;

/// Access level of a record member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Publicly readable and writable
    #[default]
    Public,
    /// Publicly readable, restricted write
    ReadOnly,
    /// Neither publicly readable nor writable
    Private,
}

/// Reads a member and maps it to a native value
pub type ReadFn<T> = fn(&T, &Mapper) -> Result<Value>;

/// Maps a native value and assigns it to a member
pub type WriteFn<T> = fn(&mut T, Value, &Mapper) -> Result<()>;

/// Descriptor of one record member
pub struct Field<T> {
    name: &'static str,
    visibility: Visibility,
    exclude: bool,
    force_include: bool,
    former_names: &'static [&'static str],
    read: ReadFn<T>,
    write: WriteFn<T>,
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("exclude", &self.exclude)
            .field("force_include", &self.force_include)
            .field("former_names", &self.former_names)
            .finish()
    }
}

impl<T> Field<T> {
    /// Public member with the given container key
    pub const fn new(name: &'static str, read: ReadFn<T>, write: WriteFn<T>) -> Self {
        Field {
            name,
            visibility: Visibility::Public,
            exclude: false,
            force_include: false,
            former_names: &[],
            read,
            write,
        }
    }

    /// Never encode or decode this member
    pub const fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    /// Encode and decode this member regardless of visibility
    pub const fn force_include(mut self) -> Self {
        self.force_include = true;
        self
    }

    /// Mark the member publicly readable but not writable
    pub const fn read_only(mut self) -> Self {
        self.visibility = Visibility::ReadOnly;
        self
    }

    /// Mark the member private
    pub const fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Legacy keys tried in order when the current name is absent
    pub const fn formerly(mut self, names: &'static [&'static str]) -> Self {
        self.former_names = names;
        self
    }

    /// Container key
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Member visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the member is excluded
    pub fn is_excluded(&self) -> bool {
        self.exclude
    }

    /// Whether the member is force-included
    pub fn is_force_included(&self) -> bool {
        self.force_include
    }

    /// Former names, in lookup order
    pub fn former_names(&self) -> &'static [&'static str] {
        self.former_names
    }

    /// Whether the member is written on encode
    pub fn is_encoded(&self) -> bool {
        !self.exclude && (self.visibility != Visibility::Private || self.force_include)
    }

    /// Whether the member is assigned on decode
    pub fn is_decoded(&self) -> bool {
        !self.exclude && (self.visibility == Visibility::Public || self.force_include)
    }

    /// Read the member as a native value
    pub fn read(&self, record: &T, mapper: &Mapper) -> Result<Value> {
        (self.read)(record, mapper)
    }

    /// Assign the member from a native value
    pub fn write(&self, record: &mut T, value: Value, mapper: &Mapper) -> Result<()> {
        (self.write)(record, value, mapper)
    }
}

/// A structured record with an explicit descriptor table.
///
/// Decoding starts from `Default` and assigns members present in the
/// container; absent members keep their default.
pub trait Record: Default + 'static {
    /// Record name used in error messages
    const NAME: &'static str;

    /// Members in declaration order
    fn fields() -> &'static [Field<Self>];
}

/// Declare the descriptor table of a record type.
///
/// Generates both the [`Record`] and [`Mappable`](crate::Mappable) impls.
/// Each member is `field` (key = field name) or `field as "Key"`, optionally
/// followed by `=> [options]` where options are `exclude`, `force_include`,
/// `read_only`, `private` and `formerly("Old", ...)`.
///
/// ```
/// use sbf_mapper::{record, Mapper, Mappable};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
///     scratch: Vec<u8>,
/// }
///
/// record! {
///     Point as "Point" {
///         x as "X",
///         y as "Y" => [formerly("Height")],
///         scratch => [exclude],
///     }
/// }
///
/// let mapper = Mapper::default();
/// let value = Point { x: 1, y: 2, scratch: vec![9] }.to_native(&mapper).unwrap();
/// let back = Point::from_native(value, &mapper).unwrap();
/// assert_eq!(back, Point { x: 1, y: 2, scratch: vec![] });
/// ```
#[macro_export]
macro_rules! record {
    (@key $field:ident) => {
        stringify!($field)
    };
    (@key $field:ident $key:literal) => {
        $key
    };
    (
        $ty:ident $(as $name:literal)? {
            $(
                $field:ident $(as $key:literal)?
                    $(=> [$($opt:ident $(($($arg:literal),* $(,)?))?),* $(,)?])?
            ),* $(,)?
        }
    ) => {
        impl $crate::Record for $ty {
            const NAME: &'static str = $crate::record!(@key $ty $($name)?);

            fn fields() -> &'static [$crate::Field<Self>] {
                const FIELDS: &[$crate::Field<$ty>] = &[
                    $(
                        $crate::Field::new(
                            $crate::record!(@key $field $($key)?),
                            |record: &$ty, mapper: &$crate::Mapper| {
                                $crate::Mappable::to_native(&record.$field, mapper)
                            },
                            |record: &mut $ty, value: $crate::Value, mapper: &$crate::Mapper| {
                                record.$field = $crate::Mappable::from_native(value, mapper)?;
                                Ok(())
                            },
                        )
                        $($(.$opt($(&[$($arg),*])?))*)?
                    ),*
                ];
                FIELDS
            }
        }

        impl $crate::Mappable for $ty {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::Record(<$ty as $crate::Record>::NAME)
            }

            fn to_native(&self, mapper: &$crate::Mapper) -> $crate::Result<$crate::Value> {
                mapper.record_to_container(self)
            }

            fn from_native(value: $crate::Value, mapper: &$crate::Mapper) -> $crate::Result<Self> {
                mapper.record_from_container(value)
            }
        }
    };
}
