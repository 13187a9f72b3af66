pub mod core {
    pub mod scalar_kind;
    pub mod utils;
    pub mod value;
}

pub mod records {
    pub mod record;
}

pub mod schema;
