pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn check_len(len: usize) -> crate::Result<usize> {
        verify_arg!(len, len > 0);
        Ok(len)
    }

    #[test]
    fn test_verify_macros() {
        assert_eq!(check_len(3).unwrap(), 3);
        match check_len(0).unwrap_err().into_kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "len");
                assert_eq!(message, "len > 0");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
        assert!(check_len(0).unwrap_err().to_string().contains("len > 0"));
    }
}
