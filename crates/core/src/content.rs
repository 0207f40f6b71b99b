//! Fixed course content shipped with the portal: the theoretical assessment,
//! the module list with the student's progress, and the simulator timetable.

use crate::model::{
    BookingError, LessonError, LessonModule, QuestionDraft, QuestionError, QuestionSet, TimeSlot,
    VehicleType,
};

/// One question per theoretical module, in lesson order.
#[must_use]
pub fn theory_assessment_drafts() -> Vec<QuestionDraft> {
    vec![
        // Legislação de Trânsito
        QuestionDraft::new(
            "Qual a velocidade máxima permitida em vias locais, quando não houver sinalização?",
            ["30 km/h", "40 km/h", "60 km/h", "80 km/h"],
            "30 km/h",
        ),
        // Direção Defensiva
        QuestionDraft::new(
            "Qual a forma mais segura de manter distância do veículo da frente?",
            [
                "Regra dos dois segundos",
                "Ficar a um metro do para-choque",
                "Acompanhar o ritmo do trânsito ao lado",
            ],
            "Regra dos dois segundos",
        ),
        // Primeiros Socorros
        QuestionDraft::new(
            "Ao presenciar um acidente com vítimas, qual deve ser a primeira atitude?",
            [
                "Sinalizar o local e pedir socorro",
                "Remover imediatamente as vítimas do veículo",
                "Oferecer água às vítimas",
            ],
            "Sinalizar o local e pedir socorro",
        ),
        // Mecânica Básica
        QuestionDraft::new(
            "A luz do óleo acendeu no painel com o motor ligado. O que fazer?",
            [
                "Parar em local seguro e verificar o nível do óleo",
                "Continuar até o próximo posto",
                "Acelerar para aumentar a pressão do óleo",
            ],
            "Parar em local seguro e verificar o nível do óleo",
        ),
        // Meio Ambiente e Cidadania
        QuestionDraft::new(
            "Qual atitude reduz a emissão de poluentes pelo veículo?",
            [
                "Manter o motor regulado",
                "Deixar o motor ligado parado",
                "Usar marchas baixas em alta velocidade",
            ],
            "Manter o motor regulado",
        ),
    ]
}

/// The built-in assessment as a validated question set.
///
/// # Errors
///
/// Returns `QuestionError` if the bundled content breaks a question invariant.
pub fn theory_assessment() -> Result<QuestionSet, QuestionError> {
    QuestionSet::from_drafts(theory_assessment_drafts())
}

/// The five theoretical modules, 44 hours in all.
///
/// # Errors
///
/// Returns `LessonError` if a bundled module is malformed.
pub fn theory_modules() -> Result<Vec<LessonModule>, LessonError> {
    Ok(vec![
        LessonModule::new("Legislação de Trânsito", 10, 80)?.completed(),
        LessonModule::new("Direção Defensiva", 12, 60)?.current(),
        LessonModule::new("Primeiros Socorros", 8, 0)?,
        LessonModule::new("Mecânica Básica", 8, 0)?,
        LessonModule::new("Meio Ambiente e Cidadania", 6, 0)?,
    ])
}

/// Daily simulator timetable for both vehicle types.
///
/// # Errors
///
/// Returns `BookingError::InvalidTime` if a bundled slot time is malformed.
pub fn simulator_slots() -> Result<Vec<TimeSlot>, BookingError> {
    use VehicleType::{Car, Motorcycle};
    Ok(vec![
        TimeSlot::new(Car, 8, 0, "Carlos Silva", "Simulador Carro 1")?,
        TimeSlot::new(Car, 9, 30, "Ana Paula", "Simulador Carro 2")?,
        TimeSlot::new(Car, 14, 0, "Mariana Costa", "Simulador Carro 1")?,
        TimeSlot::new(Motorcycle, 8, 30, "Roberto Santos", "Simulador Moto 1")?,
        TimeSlot::new(Motorcycle, 10, 0, "Pedro Oliveira", "Simulador Moto 1")?,
        TimeSlot::new(Motorcycle, 15, 30, "Juliana Lima", "Simulador Moto 1")?,
    ])
}
