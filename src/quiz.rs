use crate::types::QuizError;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Windows,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
            Platform::Windows => "Windows",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub text: String,
    pub correct: bool,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub platform: Option<Platform>,
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub title: String,
    questions: Vec<Question>,
}

impl Quiz {
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, QuizError> {
        for (idx, q) in questions.iter().enumerate() {
            if q.options.len() < 2 {
                return Err(QuizError::TooFewOptions(idx));
            }
            let correct = q.options.iter().filter(|o| o.correct).count();
            if correct != 1 {
                return Err(QuizError::CorrectCount {
                    question: idx,
                    correct,
                });
            }
        }
        Ok(Self {
            title: title.into(),
            questions,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub option: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Accepted { correct: bool },
    AlreadyAnswered,
    OutOfRange,
}

#[derive(Debug, Clone)]
pub struct QuizRunner {
    quiz: Quiz,
    answers: BTreeMap<usize, Answer>,
}

impl QuizRunner {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            answers: BTreeMap::new(),
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answer(&mut self, question: usize, option: usize) -> AnswerOutcome {
        if self.answers.contains_key(&question) {
            return AnswerOutcome::AlreadyAnswered;
        }
        let Some(chosen) = self
            .quiz
            .questions
            .get(question)
            .and_then(|q| q.options.get(option))
        else {
            return AnswerOutcome::OutOfRange;
        };

        let correct = chosen.correct;
        self.answers.insert(question, Answer { option, correct });
        AnswerOutcome::Accepted { correct }
    }

    pub fn answer_for(&self, question: usize) -> Option<Answer> {
        self.answers.get(&question).copied()
    }

    pub fn score(&self) -> usize {
        self.answers.values().filter(|a| a.correct).count()
    }

    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    /// Rounded percentage of correct answers over all questions.
    pub fn percentage(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.score() as f64 / total as f64) * 100.0).round() as u32
    }

    pub fn reset(&mut self) {
        self.answers.clear();
    }
}

fn option(text: &str, correct: bool, feedback: &str) -> QuizOption {
    QuizOption {
        text: text.to_string(),
        correct,
        feedback: feedback.to_string(),
    }
}

pub fn phishing_quiz() -> Result<Quiz, QuizError> {
    Quiz::new(
        "Test de Phishing",
        vec![
            Question {
                platform: Some(Platform::Android),
                prompt: "WhatsApp: Alguien te pide el código de 6 dígitos que te llegó por SMS."
                    .into(),
                options: vec![
                    option(
                        "Dárselo, parece urgente.",
                        false,
                        "❌ ERROR: Ese código es para robar tu cuenta.",
                    ),
                    option(
                        "Bloquear inmediatamente.",
                        true,
                        "✅ ¡CORRECTO! Nunca compartas códigos.",
                    ),
                ],
            },
            Question {
                platform: Some(Platform::Ios),
                prompt: "iCloud: Un correo dice que tu espacio está lleno.".into(),
                options: vec![
                    option(
                        "Dar clic para pagar.",
                        false,
                        "❌ ERROR: Es phishing para robar tu Apple ID.",
                    ),
                    option(
                        "Ir a Ajustes manualmente.",
                        true,
                        "✅ ¡CORRECTO! Verifica desde configuración oficial.",
                    ),
                ],
            },
            Question {
                platform: Some(Platform::Windows),
                prompt: "Recibes 'Cobro.zip' de desconocido.".into(),
                options: vec![
                    option(
                        "No abrirlo y borrar.",
                        true,
                        "✅ ¡CORRECTO! Los .zip suelen traer virus.",
                    ),
                    option(
                        "Abrirlo para ver.",
                        false,
                        "❌ ERROR: Puede contener malware.",
                    ),
                ],
            },
        ],
    )
}
