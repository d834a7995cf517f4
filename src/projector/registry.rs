use super::member::{MemberKind, MemberValue};
use crate::casing::title_cased_name;
use crate::types::FastMap;
use crate::value::Value;
use smol_str::SmolStr;
use std::any::type_name;

type Setter<T> = Box<dyn Fn(&mut T, Value) -> bool + Send + Sync>;

// ─── Member ─────────────────────────────────────────────────────────────────

/// One named member of a projection target.
pub struct Member<T> {
    name: SmolStr,
    kind: MemberKind,
    writable: bool,
    setter: Option<Setter<T>>,
}

impl<T> Member<T> {
    /// Title-cased member name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Hand an already coerced value to the setter. `false` if the member has
    /// no setter or the value does not fit it.
    pub(crate) fn assign(&self, target: &mut T, value: Value) -> bool {
        match &self.setter {
            Some(set) => set(target, value),
            None => false,
        }
    }
}

impl<T> std::fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("writable", &self.writable)
            .finish()
    }
}

// ─── MemberRegistry ─────────────────────────────────────────────────────────

/// Name → setter table for one target type. Built once, then shared.
pub struct MemberRegistry<T> {
    members: Vec<Member<T>>,
    by_name: FastMap<SmolStr, usize>,
}

impl<T> MemberRegistry<T> {
    pub fn builder() -> MemberRegistryBuilder<T> {
        MemberRegistryBuilder {
            registry: MemberRegistry {
                members: Vec::new(),
                by_name: FastMap::default(),
            },
        }
    }

    /// Look up a member by its title-cased name.
    #[inline]
    pub fn member(&self, name: &str) -> Option<&Member<T>> {
        self.by_name.get(name).map(|&i| &self.members[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member<T>> {
        self.members.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T> std::fmt::Debug for MemberRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.members.iter()).finish()
    }
}

// ─── Builder ────────────────────────────────────────────────────────────────

/// Names passed to the builder are title-cased, so `user_name` and
/// `UserName` declare the same member. Declaring a name twice replaces the
/// earlier entry.
pub struct MemberRegistryBuilder<T> {
    registry: MemberRegistry<T>,
}

impl<T: 'static> MemberRegistryBuilder<T> {
    /// A writable member of type `V`.
    pub fn member<V>(self, name: &str, set: fn(&mut T, V)) -> Self
    where
        V: MemberValue + 'static,
    {
        let setter: Setter<T> = Box::new(move |target: &mut T, value: Value| {
            match V::from_value(value) {
                Some(v) => {
                    set(target, v);
                    true
                }
                None => false,
            }
        });
        self.push(name, V::KIND, true, Some(setter))
    }

    /// A member that exists but cannot be written.
    pub fn readonly<V>(self, name: &str) -> Self {
        self.push(name, MemberKind::Unsupported(type_name::<V>()), false, None)
    }

    /// A writable member whose type has no coercion rule.
    pub fn opaque<V>(self, name: &str) -> Self {
        self.push(name, MemberKind::Unsupported(type_name::<V>()), true, None)
    }

    fn push(
        mut self,
        name: &str,
        kind: MemberKind,
        writable: bool,
        setter: Option<Setter<T>>,
    ) -> Self {
        let name = SmolStr::from(title_cased_name(name));
        let member = Member {
            name: name.clone(),
            kind,
            writable,
            setter,
        };
        let reg = &mut self.registry;
        match reg.by_name.get(&name) {
            Some(&i) => reg.members[i] = member,
            None => {
                reg.by_name.insert(name, reg.members.len());
                reg.members.push(member);
            }
        }
        self
    }

    pub fn build(self) -> MemberRegistry<T> {
        self.registry
    }
}

// ─── Projectable ────────────────────────────────────────────────────────────

/// A type with a cached [`MemberRegistry`], usable with
/// [`Record::as_struct`](crate::record::Record::as_struct).
pub trait Projectable: Sized + 'static {
    fn registry() -> &'static MemberRegistry<Self>;
}

/// Implement [`Projectable`] for a struct by listing its members.
///
/// Every listed field becomes a member named after the title-cased field
/// name. Prefix an entry with `#[readonly]` to declare a member that cannot
/// be written, or `#[opaque]` for a field whose type has no coercion rule.
/// The registry is built on first use and cached.
///
/// ```
/// use spooky_recordset::{record, record_members, Lane};
///
/// #[derive(Default)]
/// struct User {
///     user_name: String,
///     age: u8,
/// }
///
/// record_members!(User {
///     user_name: String,
///     age: u8,
/// });
///
/// let rec = record! { "user_name" => "alice", "age" => "41" };
/// let mut user = User::default();
/// let report = rec.as_struct(&mut user, Lane::Primary);
/// assert!(report.is_clean());
/// assert_eq!((user.user_name.as_str(), user.age), ("alice", 41));
/// ```
#[macro_export]
macro_rules! record_members {
    (@entry $b:ident, $ty:ty, [] $field:ident : $fty:ty) => {
        $b.member(stringify!($field), |target: &mut $ty, value: $fty| target.$field = value)
    };
    (@entry $b:ident, $ty:ty, [readonly] $field:ident : $fty:ty) => {
        $b.readonly::<$fty>(stringify!($field))
    };
    (@entry $b:ident, $ty:ty, [opaque] $field:ident : $fty:ty) => {
        $b.opaque::<$fty>(stringify!($field))
    };
    ($ty:ty { $($(#[$mode:ident])? $field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::projector::Projectable for $ty {
            fn registry() -> &'static $crate::projector::MemberRegistry<Self> {
                static REGISTRY: ::std::sync::OnceLock<$crate::projector::MemberRegistry<$ty>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    let builder = $crate::projector::MemberRegistry::<$ty>::builder();
                    $(
                        let builder = $crate::record_members!(
                            @entry builder, $ty, [$($mode)?] $field : $fty
                        );
                    )*
                    builder.build()
                })
            }
        }
    };
}
