//! Static previous-year-question bank for Odisha state exams.
//!
//! Read-only lookup table consulted before any remote generation: serving
//! real PYQs is both faster and higher fidelity than generated items.

use serde::Serialize;

use super::Question;

/// One previous-year question as stored in the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PyqItem {
    pub id: &'static str,
    pub exam: &'static str,
    pub year: &'static str,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub answer: &'static str,
    pub explanation: &'static str,
}

impl PyqItem {
    pub fn to_question(&self) -> Question {
        Question {
            id: self.id.to_string(),
            question: self.question.to_string(),
            options: self.options.iter().map(|o| o.to_string()).collect(),
            correct_answer: self.answer.to_string(),
            explanation: self.explanation.to_string(),
            subject: None,
        }
    }
}

/// Subject filter value that matches every question.
pub const GENERAL_STUDIES: &str = "General Studies";

/// Looks up bank items with the loose matching the product uses:
/// case-insensitive substring of the exam's first word against the stored
/// exam name, exact year when given, and a case-insensitive substring of
/// the subject against the question text (General Studies matches all).
pub fn lookup_pyqs(exam: &str, subject: &str, year: Option<&str>) -> Vec<PyqItem> {
    let exam_key = exam
        .split_whitespace()
        .next()
        .unwrap_or(exam)
        .to_lowercase();
    let subject_key = subject.to_lowercase();
    ODISHA_PYQ_BANK
        .iter()
        .filter(|item| {
            let exam_match = item.exam.to_lowercase().contains(&exam_key);
            let year_match = year.map(|y| item.year == y).unwrap_or(true);
            let subject_match = subject == GENERAL_STUDIES
                || item.question.to_lowercase().contains(&subject_key);
            exam_match && year_match && subject_match
        })
        .cloned()
        .collect()
}

pub static ODISHA_PYQ_BANK: &[PyqItem] = &[
    // OPSC OAS 2022, General Studies
    PyqItem {
        id: "opsc-2022-gs-1",
        exam: "OPSC OAS",
        year: "2022",
        question: "Which of the following dynasties ruled over Odisha immediately after the fall of the Somavamshis?",
        options: [
            "Ganga Dynasty",
            "Suryavamshi Gajapatis",
            "Bhauma-Karas",
            "Matharas",
        ],
        answer: "Ganga Dynasty",
        explanation: "The Eastern Ganga dynasty established their rule over Odisha after defeating the Somavamshis in the early 12th century. Anantavarman Chodaganga Deva was a prominent ruler.",
    },
    PyqItem {
        id: "opsc-2022-gs-2",
        exam: "OPSC OAS",
        year: "2022",
        question: "The 'Kalinga' war was fought in which year?",
        options: ["261 BC", "261 AD", "232 BC", "240 BC"],
        answer: "261 BC",
        explanation: "The Kalinga War was fought in 261 BC between the Maurya Empire under Ashoka and the state of Kalinga.",
    },
    PyqItem {
        id: "opsc-2022-gs-3",
        exam: "OPSC OAS",
        year: "2022",
        question: "Who was the first Satyagrahi of Odisha during the Individual Satyagraha Movement?",
        options: [
            "Harekrusna Mahatab",
            "Sarala Devi",
            "Rama Devi",
            "Malati Choudhury",
        ],
        answer: "Harekrusna Mahatab",
        explanation: "Harekrusna Mahatab was chosen as the first Satyagrahi from Odisha during the Individual Satyagraha of 1940.",
    },
    // OSSC CGL 2023
    PyqItem {
        id: "ossc-cgl-2023-1",
        exam: "OSSC CGL",
        year: "2023",
        question: "The 'Bhitarkanika National Park' is famous for the conservation of which species?",
        options: ["Tiger", "Saltwater Crocodile", "Elephant", "Rhino"],
        answer: "Saltwater Crocodile",
        explanation: "Bhitarkanika is a Ramsar site and is globally famous for its successful conservation of Saltwater Crocodiles (Estuarine Crocodiles).",
    },
    PyqItem {
        id: "ossc-cgl-2023-2",
        exam: "OSSC CGL",
        year: "2023",
        question: "Who wrote the famous Odia book 'Chha Mana Atha Guntha'?",
        options: [
            "Fakir Mohan Senapati",
            "Radhanath Ray",
            "Gangadhar Meher",
            "Madhusudan Das",
        ],
        answer: "Fakir Mohan Senapati",
        explanation: "'Chha Mana Atha Guntha' is a classic Odia novel written by Fakir Mohan Senapati, dealing with the exploitation of peasants.",
    },
    PyqItem {
        id: "ossc-cgl-2023-3",
        exam: "OSSC CGL",
        year: "2023",
        question: "Which river is known as the 'Sorrow of Odisha'?",
        options: ["Brahmani", "Mahanadi", "Baitarani", "Rushikulya"],
        answer: "Mahanadi",
        explanation: "Historically, the Mahanadi was called the 'Sorrow of Odisha' due to its devastating floods, though the construction of Hirakud Dam has controlled it significantly.",
    },
    // Odisha Police SI
    PyqItem {
        id: "police-si-2021-1",
        exam: "Odisha Police SI",
        year: "2021",
        question: "The headquarters of the Odisha Olympic Association is located in which city?",
        options: ["Bhubaneswar", "Cuttack", "Rourkela", "Puri"],
        answer: "Cuttack",
        explanation: "The Odisha Olympic Association is headquartered at the Barabati Stadium in Cuttack.",
    },
    // OSSSC Combined
    PyqItem {
        id: "osssc-comb-2023-1",
        exam: "OSSSC Combined",
        year: "2023",
        question: "In computer terminology, what does 'CPU' stand for?",
        options: [
            "Central Processing Unit",
            "Control Processing Unit",
            "Central Program Unit",
            "Common Processing Unit",
        ],
        answer: "Central Processing Unit",
        explanation: "CPU stands for Central Processing Unit, often referred to as the brain of the computer.",
    },
];
