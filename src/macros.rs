/// Generates an option enum that is sent as a query parameter.
///
/// ## Example
///
/// Generating the sort order of a listing:
///
/// ```
/// use goodreads_rs::{query_parameter_enum, QueryParameter};
///
/// query_parameter_enum!(
///     /// The order of a listing.
///     Order, "order", {
///         /// Ascending.
///         Ascending => "a",
///         /// Descending.
///         Descending => "d",
///     }
/// );
///
/// assert_eq!(Order::KEY, "order");
/// assert_eq!(Order::Descending.value(), "d");
/// ```
#[macro_export]
macro_rules! query_parameter_enum {
    ($(#[$meta:meta])* $name:ident, $key:literal, { $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::QueryParameter for $name {
            const KEY: &'static str = $key;

            fn value(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }
    };
}
