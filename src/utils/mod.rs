pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{OptimizerError, OptimizerResult, PathError, ValidationError};
pub use validation::{validate_input_path, validate_settings, validate_source_dir};
pub use formats::{SourceFormat, ensure_codecs_available, format_from_path};
pub use fs::{
    get_file_size,
    get_file_size_kb,
    create_dir_all,
    list_images,
    write_atomic,
};
