/// Construct a BSON value
///
/// ```rust
/// use cabala::{Bson, bson};
///
/// let value = bson!([1, "two", { "three" => 3.0 }]);
/// assert_eq!(value.as_array().map(Vec::len), Some(3));
/// ```
#[macro_export]
macro_rules! bson {
    ([]) => {{ $crate::Bson::Array(Vec::new()) }};

    ([$($val:tt),*]) => {{
        let mut array = Vec::new();

        $(
            array.push($crate::bson!($val));
        )*

        $crate::Bson::Array(array)
    }};

    ([$val:expr]) => {{
        $crate::Bson::Array(vec!($crate::Bson::from($val)))
    }};

    ({ $($k:expr => $v:tt),* }) => {{
        $crate::Bson::Document($crate::doc! {
            $(
                $k => $v
            ),*
        })
    }};

    ($val:expr) => {{
        $crate::Bson::from($val)
    }};
}

/// Construct a BSON Document. Keys are appended in order, so a repeated key is kept twice.
///
/// ```rust
/// use cabala::doc;
///
/// let doc = doc! { "a" => 1, "b" => { "c" => "d" } };
/// assert_eq!(doc.len(), 2);
/// ```
#[macro_export]
macro_rules! doc {
    () => {{ $crate::Document::new() }};

    ( $($key:expr => $val:tt),* ) => {{
        let mut document = $crate::Document::new();

        $(
            document.push($key, $crate::bson!($val));
        )*

        document
    }};
}
