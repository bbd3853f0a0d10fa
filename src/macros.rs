#[macro_export]
#[cfg(test)]
macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(not(feature = "std"))]
        extern crate std;
        std::eprintln!($($arg)*);
    }};
}
#[macro_export]
#[cfg(not(test))]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

// from: https://github.com/wcampbell0x2a/assert_hex/blob/master/src/lib.rs
#[macro_export]
macro_rules! assert_eq_hex {
    ($left:expr, $right:expr $(,)?) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    panic!(
                        r#"assertion failed: `(left == right)`
  left: `{:02x?}`,
 right: `{:02x?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
}

/// Declares modules that are `pub` with the `pub_internals` feature and crate-private otherwise.
macro_rules! internal_mods {
    ($($(#[$attr:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            #[cfg(feature = "pub_internals")]
            pub mod $name;

            $(#[$attr])*
            #[cfg(not(feature = "pub_internals"))]
            pub(crate) mod $name;
        )*
    };
}
