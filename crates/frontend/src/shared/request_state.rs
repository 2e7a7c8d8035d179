/// What a data hook exposes to rendering code.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
        }
    }
}

impl<T> RequestState<T> {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
