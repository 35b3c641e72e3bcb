pub type ImprintResult<T> = Result<T, ImprintError>;

#[derive(thiserror::Error, Debug)]
pub enum ImprintError {
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("not loaded: {0}")]
    NotLoaded(String),

    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    #[error("load error: {0}")]
    Load(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImprintError {
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    pub fn not_loaded(msg: impl Into<String>) -> Self {
        Self::NotLoaded(msg.into())
    }

    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
