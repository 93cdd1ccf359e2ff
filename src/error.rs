use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("operands could not be broadcast together with shapes {lhs:?} and {rhs:?}")]
    Broadcast { lhs: Vec<usize>, rhs: Vec<usize> },

    #[error("{name} must be one-dimensional, got {ndim} dimensions")]
    NotOneDimensional { name: &'static str, ndim: usize },

    // theta-theta needs exactly one axis of angles in front of (frequency, time)
    #[error("expected a single axis of scattering angles, got point shape {0:?}")]
    PointShape(Vec<usize>),

    #[error("a dynamic field needs frequency and time axes, got {0} dimensions")]
    MissingGridAxes(usize),

    #[error("frequency/time grid is empty")]
    EmptyGrid,

    #[error("sampled domain runs backwards, from {start} to {end}")]
    ReversedDomain { start: f64, end: f64 },

    #[error("index ({row}, {col}) is out of bounds for a {rows}x{cols} matrix")]
    Index {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
