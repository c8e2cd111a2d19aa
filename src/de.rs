use serde::de::{Deserialize, Deserializer, Error};

/// Deserialize a string into any newtype around it, rejecting the empty
/// string as though the field were missing.
pub fn non_empty<'a, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'a>,
    T: From<String>,
{
    String::deserialize(deserializer).and_then(|s| {
        if s.is_empty() {
            Err(Error::custom("invalid string: empty"))
        } else {
            Ok(T::from(s))
        }
    })
}

#[test]
fn test_non_empty() {
    #[derive(Debug, PartialEq, Eq)]
    struct Id(String);

    impl From<String> for Id {
        fn from(x: String) -> Self {
            Id(x)
        }
    }

    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct T {
        #[serde(deserialize_with = "non_empty")]
        val: Id,
    }

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": "x"}"#).unwrap(),
        T { val: Id("x".into()) },
    );

    assert!(serde_json::from_str::<T>(r#"{"val": ""}"#).is_err());
    assert!(serde_json::from_str::<T>(r#"{"val": 1}"#).is_err());
}
