//! Line-oriented front end for one assessment attempt.

use std::io::{self, BufRead, Write};

use services::AssessmentService;
use vida_core::model::{QuizAction, QuizResult, QuizSession};

enum Input {
    Choose(usize),
    Next,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "n" | "next" | "próxima" => Input::Next,
        "q" | "quit" | "sair" => Input::Quit,
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map_or(Input::Unknown, |n| Input::Choose(n - 1)),
    }
}

fn render_question(quiz: &QuizSession, out: &mut impl Write) -> io::Result<()> {
    let (Some(index), Some(question)) = (quiz.current_index(), quiz.current_question()) else {
        return Ok(());
    };
    writeln!(out)?;
    writeln!(
        out,
        "Questão {} de {}: {}",
        index + 1,
        quiz.questions().len(),
        question.prompt()
    )?;
    for (i, option) in question.options().iter().enumerate() {
        writeln!(out, "  {}) {option}", i + 1)?;
    }
    writeln!(out, "Digite o número da resposta, 'n' para avançar ou 'q' para sair.")
}

/// Drive `quiz` from `input` until it completes or the user quits.
///
/// Returns the final score, or `None` when the attempt was abandoned.
///
/// # Errors
///
/// Propagates I/O errors from `input` or `out`.
pub fn run_quiz(
    service: &AssessmentService,
    mut quiz: QuizSession,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<QuizResult>> {
    render_question(&quiz, out)?;
    let mut lines = input.lines();

    while !quiz.is_complete() {
        let Some(line) = lines.next().transpose()? else {
            return Ok(None);
        };

        match parse_input(&line) {
            Input::Choose(i) => {
                let option = quiz
                    .current_question()
                    .and_then(|q| q.options().get(i))
                    .cloned();
                match option {
                    Some(option) => {
                        writeln!(out, "Selecionada: {option}")?;
                        quiz = service.dispatch(quiz, QuizAction::Select(option));
                    }
                    None => writeln!(out, "Opção inválida.")?,
                }
            }
            Input::Next if !quiz.can_advance() => {
                writeln!(out, "Selecione uma resposta antes de continuar.")?;
            }
            Input::Next => {
                quiz = service.dispatch(quiz, QuizAction::Advance);
                render_question(&quiz, out)?;
            }
            Input::Quit => return Ok(None),
            Input::Unknown => writeln!(out, "Opção inválida.")?,
        }
    }

    let result = service.score(&quiz);
    writeln!(out)?;
    writeln!(
        out,
        "Resultado: {} de {} corretas ({:.1}%)",
        result.correct_count, result.total_questions, result.percentage
    )?;
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use services::{AssessmentError, QuestionSource};
    use vida_core::model::{QuestionDraft, QuestionSet};

    struct TwoQuestions;

    impl QuestionSource for TwoQuestions {
        fn questions(&self) -> Result<QuestionSet, AssessmentError> {
            Ok(QuestionSet::from_drafts([
                QuestionDraft::new("Q1", ["A", "B"], "A"),
                QuestionDraft::new("Q2", ["C", "D"], "D"),
            ])?)
        }
    }

    fn run(script: &str) -> (Option<QuizResult>, String) {
        let service = AssessmentService::new(Arc::new(TwoQuestions));
        let quiz = service.open().unwrap();
        let mut out = Vec::new();
        let result = run_quiz(&service, quiz, Cursor::new(script), &mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn scripted_attempt_is_scored() {
        let (result, out) = run("1\nn\n1\nn\n");
        let result = result.unwrap();
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.percentage, 50.0);
        assert!(out.contains("Resultado: 1 de 2 corretas (50.0%)"));
    }

    #[test]
    fn next_is_refused_until_an_answer_is_chosen() {
        let (result, out) = run("n\n2\n1\nn\n2\nn\n");
        assert!(out.contains("Selecione uma resposta antes de continuar."));
        assert_eq!(result.unwrap().correct_count, 2);
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let (result, out) = run("9\n0\nabc\nq\n");
        assert_eq!(result, None);
        assert_eq!(out.matches("Opção inválida.").count(), 3);
    }

    #[test]
    fn end_of_input_abandons_the_attempt() {
        let (result, _) = run("1\n");
        assert_eq!(result, None);
    }
}
