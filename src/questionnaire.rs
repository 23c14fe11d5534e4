//! The quiz content and answer formatting.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Clone)]
pub struct Question {
    pub pregunta: &'static str,
    #[serde(serialize_with = "serialize_opciones")]
    pub opciones: &'static [(&'static str, &'static str)],
}

impl Question {
    /// Text of the option chosen by `letra`, if it exists.
    pub fn option_text(&self, letra: &str) -> Option<&'static str> {
        self.opciones
            .iter()
            .find(|(l, _)| *l == letra)
            .map(|(_, texto)| *texto)
    }
}

// Options serialize as an object keyed by letter, matching the shape the
// quiz front end expects.
fn serialize_opciones<S>(
    opciones: &&'static [(&'static str, &'static str)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(opciones.len()))?;
    for (letra, texto) in opciones.iter() {
        map.serialize_entry(letra, texto)?;
    }
    map.end()
}

pub const QUESTIONS: &[Question] = &[
    Question {
        pregunta: "¿Cómo prefieres pasar tu tiempo libre?",
        opciones: &[
            ("A", "En casa relajado y tranquilo."),
            ("B", "Haciendo ejercicio o explorando al aire libre."),
            ("C", "Con amigos o en reuniones sociales."),
            ("D", "Probando algo nuevo o creativo."),
        ],
    },
    Question {
        pregunta: "¿Cómo reaccionas ante una situación de peligro?",
        opciones: &[
            ("A", "Me escondo y pienso con calma antes de actuar."),
            ("B", "Reacciono rápido y enfrento la situación."),
            ("C", "Busco ayuda o protejo a quienes me rodean."),
            ("D", "Me adapto rápidamente, aunque no sepa qué hacer."),
        ],
    },
    Question {
        pregunta: "¿Qué ritmo de vida llevas?",
        opciones: &[
            ("A", "Lento y relajado, disfruto cada momento."),
            ("B", "Activo y lleno de energía."),
            ("C", "Equilibrado, según el día y la situación."),
            ("D", "Impredecible, cada día es diferente."),
        ],
    },
    Question {
        pregunta: "¿Cómo te describirían tus amigos?",
        opciones: &[
            ("A", "Tranquilo y observador."),
            ("B", "Valiente y determinado."),
            ("C", "Leal y protector."),
            ("D", "Curioso y divertido."),
        ],
    },
    Question {
        pregunta: "¿Prefieres estar solo o acompañado?",
        opciones: &[
            ("A", "Prefiero estar solo, me siento cómodo así."),
            ("B", "Me gusta estar con otros, pero también necesito mi espacio."),
            ("C", "Me encanta estar en grupo, siempre rodeado de gente."),
            ("D", "Depende, a veces solo y a veces con todos."),
        ],
    },
    Question {
        pregunta: "¿Cuál de estas comidas te representa mejor?",
        opciones: &[
            ("A", "Algo simple pero delicioso, como pan o frutas."),
            ("B", "Carne o platillos intensos."),
            ("C", "Comida casera, tradicional."),
            ("D", "Algo exótico o fuera de lo común."),
        ],
    },
    Question {
        pregunta: "¿Qué paisajes prefieres?",
        opciones: &[
            ("A", "Bosques o montañas silenciosas."),
            ("B", "Praderas o selvas llenas de vida."),
            ("C", "Lugares cálidos y protegidos."),
            ("D", "Playas, desiertos o lugares inusuales."),
        ],
    },
    Question {
        pregunta: "¿Cuál de estas cualidades valoras más en ti mismo?",
        opciones: &[
            ("A", "Inteligencia y reflexión."),
            ("B", "Fuerza y determinación."),
            ("C", "Lealtad y compromiso."),
            ("D", "Creatividad y adaptabilidad."),
        ],
    },
];

/// Pairs each submitted answer with its question, in question order, and
/// renders one `"{n}. {pregunta} -> {opción}"` line per pair. An unknown
/// option letter renders as an empty option text.
pub fn format_answers(respuestas: &BTreeMap<String, String>) -> Vec<String> {
    QUESTIONS
        .iter()
        .zip(respuestas.values())
        .enumerate()
        .map(|(i, (question, letra))| {
            format!(
                "{}. {} -> {}",
                i + 1,
                question.pregunta,
                question.option_text(letra).unwrap_or("")
            )
        })
        .collect()
}
