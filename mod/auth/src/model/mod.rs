mod administrador;
mod sesion;

pub use administrador::*;
pub use sesion::*;
