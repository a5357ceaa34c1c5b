#[macro_export]
macro_rules! model {
    // Handle undefined
    (undefined) => {
        $crate::Value::Undefined
    };

    // Handle true
    (true) => {
        $crate::Value::Boolean(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Boolean(false)
    };

    // Handle empty list
    ([]) => {
        $crate::Value::List(vec![])
    };

    // Handle non-empty list
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::model!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::ValueMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ValueMap::new();
        $(
            object.insert($key.to_string(), $crate::model!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback: anything with a From conversion into Value
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
