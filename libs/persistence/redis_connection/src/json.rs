use std::ops::Deref;

use deadpool_redis::redis::{
    ErrorKind, FromRedisValue, RedisError, RedisResult, RedisWrite,
    ToRedisArgs, Value,
};
use serde::{Serialize, de::DeserializeOwned};

/// Stores `T` as a JSON string value.
///
/// Reading a missing key fails; read `Option<Json<T>>` when absence is
/// expected.
#[derive(Clone, Debug, PartialEq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn inner(self) -> T { self.0 }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl<T> ToRedisArgs for Json<T>
where
    T: Serialize,
{
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => out.write_arg(&bytes),
            Err(e) => {
                tracing::error!("JSON serialization failed: {e}");
                out.write_arg(b"null")
            }
        }
    }
}

impl<T> FromRedisValue for Json<T>
where
    T: DeserializeOwned,
{
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        match v {
            Value::BulkString(data) => {
                serde_json::from_slice(data).map(Json).map_err(|e| {
                    RedisError::from((
                        ErrorKind::TypeError,
                        "JSON deserialization failed",
                        e.to_string(),
                    ))
                })
            }
            Value::Nil => {
                Err(RedisError::from((
                    ErrorKind::TypeError,
                    "Cannot convert nil to JSON value",
                )))
            }
            _ => {
                Err(RedisError::from((
                    ErrorKind::TypeError,
                    "Expected bulk string for JSON",
                )))
            }
        }
    }
}
