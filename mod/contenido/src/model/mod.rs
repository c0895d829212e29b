pub mod ambito;
pub mod carrera;
pub mod configuracion;
pub mod desglose;
pub mod docente;
pub mod evento;
pub mod noticia;
pub mod perfil_egresado;
pub mod plan;
pub mod resumen;
pub mod video;
pub mod visita;

pub use ambito::{AmbitoDraft, AmbitoLaboral};
pub use carrera::{Carrera, CarreraDraft};
pub use configuracion::{ConfiguracionDraft, ConfiguracionFacultad};
pub use desglose::DesgloseCarrera;
pub use docente::{Docente, DocenteDraft};
pub use evento::{Evento, EventoDraft, TipoEvento};
pub use noticia::{Noticia, NoticiaDraft};
pub use perfil_egresado::{PerfilEgresado, PerfilEgresadoDraft};
pub use plan::{Categoria, PlanEstudios, PlanEstudiosDraft};
pub use resumen::ResumenPanel;
pub use video::{VideoDraft, VideoPromocional};
pub use visita::{ResumenVisitas, TipoPagina, Visita, VisitaDraft};
