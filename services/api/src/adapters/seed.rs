//! services/api/src/adapters/seed.rs
//!
//! The fixed course catalog loaded at startup: three language tracks, each
//! with alphabet, number and greeting modules. Lesson videos are segments of
//! three reference videos, cut by the timestamp tables below (seconds).

use handspeak_core::domain::{
    Course, CourseLevel, Lesson, Module, ModuleType, PracticeExercise, Resource, SignLanguage,
};
use serde_json::json;

const ALPHABET_VIDEO: &str = "sHyG7iz3ork";
const NUMBERS_VIDEO: &str = "Y4stD_ypaAI";
const GREETINGS_VIDEO: &str = "RZQTVnzMx4U";

const EMBED_FLAGS: &str = "autoplay=1&rel=0&controls=0&showinfo=0&modestbranding=1&iv_load_policy=3&fs=0&disablekb=1&enablejsapi=0&widget_referrer=0&cc_load_policy=0&cc_lang_pref=0&playsinline=1";

const ALPHABET_TIMESTAMPS: [(char, u32, u32); 26] = [
    ('A', 30, 38),
    ('B', 38, 46),
    ('C', 46, 52),
    ('D', 52, 62),
    ('E', 62, 69),
    ('F', 69, 78),
    ('G', 78, 86),
    ('H', 86, 94),
    ('I', 94, 102),
    ('J', 102, 110),
    ('K', 110, 121),
    ('L', 121, 127),
    ('M', 127, 136),
    ('N', 136, 146),
    ('O', 146, 153),
    ('P', 153, 161),
    ('Q', 161, 168),
    ('R', 168, 175),
    ('S', 175, 183),
    ('T', 183, 193),
    ('U', 193, 200),
    ('V', 200, 207),
    ('W', 207, 214),
    ('X', 214, 222),
    ('Y', 222, 232),
    ('Z', 232, 240),
];

const NUMBER_TIMESTAMPS: [(u32, u32, u32); 11] = [
    (0, 84, 90),
    (1, 90, 96),
    (2, 96, 103),
    (3, 103, 114),
    (4, 114, 123),
    (5, 123, 132),
    (6, 132, 145),
    (7, 145, 153),
    (8, 153, 160),
    (9, 160, 169),
    (10, 169, 176),
];

const GREETING_TIMESTAMPS: [(&str, u32, u32); 17] = [
    ("Bored", 77, 85),
    ("Busy", 85, 98),
    ("Sleepy", 98, 106),
    ("Tired", 106, 116),
    ("Sick", 116, 125),
    ("Sad", 125, 135),
    ("Scared", 135, 144),
    ("Mad", 144, 155),
    ("Confused", 155, 166),
    ("Nothing", 166, 175),
    ("Same", 175, 186),
    ("Bad", 186, 195),
    ("SoSo", 195, 203),
    ("Fine", 203, 210),
    ("Good", 210, 220),
    ("Excited", 220, 229),
    ("Happy", 229, 238),
];

/// The seeded catalog, with lesson counts derived from the generated lessons.
pub struct Catalog {
    pub courses: Vec<Course>,
    pub modules: Vec<Module>,
    pub lessons: Vec<Lesson>,
}

pub fn catalog() -> Catalog {
    let mut courses = Vec::new();
    let mut modules = Vec::new();
    let mut lessons: Vec<Lesson> = Vec::new();
    let mut next_module_id = 1;

    for (course_index, language) in SignLanguage::ALL.into_iter().enumerate() {
        let course_id = course_index as i64 + 1;
        let mut course_lessons = 0;

        let module_types = [ModuleType::Alphabets, ModuleType::Numbers, ModuleType::Greetings];
        for (order, module_type) in module_types.into_iter().enumerate() {
            let module_id = next_module_id;
            next_module_id += 1;

            let first_id = lessons.len() as i64 + 1;
            let generated = match module_type {
                ModuleType::Alphabets => alphabet_lessons(first_id, module_id, language),
                ModuleType::Numbers => number_lessons(first_id, module_id, language),
                ModuleType::Greetings => greeting_lessons(first_id, module_id, language),
            };
            let count = generated.len() as u32;
            course_lessons += count;
            lessons.extend(generated);

            modules.push(module(module_id, course_id, language, module_type, order as u32 + 1, count));
        }

        courses.push(Course {
            id: course_id,
            title: format!("{} ({})", language.full_name(), language),
            description: format!(
                "Learn {} ({}) - Alphabet, Numbers, and Basic Greetings",
                language.full_name(),
                language
            ),
            language,
            image_url: format!("/courses/{}-course.jpg", language.as_str().to_lowercase()),
            lessons: course_lessons,
            duration_hours: 10,
            level: CourseLevel::Beginner,
            category: "comprehensive".to_string(),
        });
    }

    Catalog {
        courses,
        modules,
        lessons,
    }
}

fn module(
    id: i64,
    course_id: i64,
    language: SignLanguage,
    module_type: ModuleType,
    order: u32,
    lessons: u32,
) -> Module {
    let (title, description) = match module_type {
        ModuleType::Alphabets => (
            format!("{} Alphabet", language),
            format!("Learn the {} alphabet - 26 letters", language),
        ),
        ModuleType::Numbers => (
            format!("{} Numbers", language),
            format!("Learn numbers 0-10 in {}", language),
        ),
        ModuleType::Greetings => (
            format!("{} Basic Words & Greetings", language),
            format!("Learn essential greetings and phrases in {}", language),
        ),
    };
    Module {
        id,
        course_id,
        title,
        description,
        module_type,
        order,
        lessons,
    }
}

fn video_url(video: &str, start: u32, end: u32) -> String {
    format!("https://www.youtube.com/embed/{video}?start={start}&end={end}&{EMBED_FLAGS}")
}

fn thumbnail_url(video: &str) -> String {
    format!("https://img.youtube.com/vi/{video}/maxresdefault.jpg")
}

/// Fields shared by every generated lesson.
struct LessonSpec<'a> {
    id: i64,
    module_id: i64,
    order: u32,
    language: SignLanguage,
    video: &'a str,
    start: u32,
    end: u32,
    /// Human-facing subject, e.g. `letter A` or `"Happy"`.
    subject: String,
    title: String,
    practice_title: String,
    key_points: Vec<String>,
    resource_path: String,
}

impl LessonSpec<'_> {
    fn build(self) -> Lesson {
        let lang = self.language.as_str();
        Lesson {
            id: self.id,
            module_id: self.module_id,
            description: format!("Learn to sign {} in {}", self.subject, lang),
            content: format!("Learn how to sign {} in {}", self.subject, lang),
            video_url: video_url(self.video, self.start, self.end),
            thumbnail_url: Some(thumbnail_url(self.video)),
            order: self.order,
            duration: self.end - self.start,
            key_points: self.key_points,
            practice_exercises: vec![PracticeExercise {
                kind: "record".to_string(),
                title: format!("Practice {}", self.practice_title),
                description: format!("Record yourself signing {}", self.subject),
                content: json!({ "prompt": format!("Sign {}", self.subject) }),
            }],
            resources: vec![Resource {
                kind: "pdf".to_string(),
                title: format!("{} {} Guide", lang, self.practice_title),
                description: format!("Guide for signing {}", self.subject),
                url: format!("/resources/{}/{}", lang.to_lowercase(), self.resource_path),
            }],
            title: self.title,
        }
    }
}

fn alphabet_lessons(first_id: i64, module_id: i64, language: SignLanguage) -> Vec<Lesson> {
    ALPHABET_TIMESTAMPS
        .iter()
        .enumerate()
        .map(|(i, &(letter, start, end))| {
            LessonSpec {
                id: first_id + i as i64,
                module_id,
                order: i as u32 + 1,
                language,
                video: ALPHABET_VIDEO,
                start,
                end,
                subject: format!("letter {letter}"),
                title: format!("Letter {letter}"),
                practice_title: format!("Letter {letter}"),
                key_points: vec![
                    format!("Hand position for letter {letter}"),
                    "Common mistakes to avoid".to_string(),
                    "Practice exercises".to_string(),
                ],
                resource_path: format!("alphabet/letter-{}.pdf", letter.to_ascii_lowercase()),
            }
            .build()
        })
        .collect()
}

fn number_lessons(first_id: i64, module_id: i64, language: SignLanguage) -> Vec<Lesson> {
    NUMBER_TIMESTAMPS
        .iter()
        .enumerate()
        .map(|(i, &(number, start, end))| {
            LessonSpec {
                id: first_id + i as i64,
                module_id,
                order: i as u32 + 1,
                language,
                video: NUMBERS_VIDEO,
                start,
                end,
                subject: format!("number {number}"),
                title: format!("Number {number}"),
                practice_title: format!("Number {number}"),
                key_points: vec![
                    format!("Hand position for number {number}"),
                    "Common mistakes to avoid".to_string(),
                    "Practice exercises".to_string(),
                ],
                resource_path: format!("numbers/number-{number}.pdf"),
            }
            .build()
        })
        .collect()
}

fn greeting_lessons(first_id: i64, module_id: i64, language: SignLanguage) -> Vec<Lesson> {
    GREETING_TIMESTAMPS
        .iter()
        .enumerate()
        .map(|(i, &(word, start, end))| {
            LessonSpec {
                id: first_id + i as i64,
                module_id,
                order: i as u32 + 1,
                language,
                video: GREETINGS_VIDEO,
                start,
                end,
                subject: format!("\"{word}\""),
                title: word.to_string(),
                practice_title: word.to_string(),
                key_points: vec![
                    format!("Hand position for \"{word}\""),
                    "Facial expressions".to_string(),
                    "Common variations".to_string(),
                    "Practice tips".to_string(),
                ],
                resource_path: format!("greetings/{}.pdf", word.to_lowercase()),
            }
            .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_three_courses_with_three_modules_each() {
        let catalog = catalog();
        assert_eq!(catalog.courses.len(), 3);
        assert_eq!(catalog.modules.len(), 9);
        for course in &catalog.courses {
            let orders: Vec<u32> = catalog
                .modules
                .iter()
                .filter(|m| m.course_id == course.id)
                .map(|m| m.order)
                .collect();
            assert_eq!(orders, vec![1, 2, 3]);
        }
    }

    #[test]
    fn lesson_counts_match_children() {
        let catalog = catalog();
        for module in &catalog.modules {
            let children = catalog.lessons.iter().filter(|l| l.module_id == module.id).count();
            assert_eq!(module.lessons as usize, children, "module {}", module.id);
        }
        for course in &catalog.courses {
            let total: u32 = catalog
                .modules
                .iter()
                .filter(|m| m.course_id == course.id)
                .map(|m| m.lessons)
                .sum();
            assert_eq!(course.lessons, total);
            assert_eq!(course.lessons, 26 + 11 + 17);
        }
    }

    #[test]
    fn lesson_ids_are_sequential() {
        let catalog = catalog();
        let ids: Vec<i64> = catalog.lessons.iter().map(|l| l.id).collect();
        assert_eq!(ids, (1..=catalog.lessons.len() as i64).collect::<Vec<_>>());
    }

    #[test]
    fn lesson_video_segments_use_timestamps() {
        let catalog = catalog();
        let letter_b = &catalog.lessons[1];
        assert_eq!(letter_b.title, "Letter B");
        assert_eq!(letter_b.duration, 8);
        assert!(letter_b.video_url.contains("sHyG7iz3ork?start=38&end=46"));
        assert_eq!(letter_b.resources[0].url, "/resources/asl/alphabet/letter-b.pdf");

        let zero = catalog.lessons.iter().find(|l| l.title == "Number 0").unwrap();
        assert_eq!(zero.duration, 6);
        assert_eq!(zero.order, 1);
    }

    #[test]
    fn greeting_lessons_carry_prompt() {
        let catalog = catalog();
        let happy = catalog
            .lessons
            .iter()
            .find(|l| l.title == "Happy" && l.module_id == 3)
            .unwrap();
        assert_eq!(happy.practice_exercises[0].content["prompt"], "Sign \"Happy\"");
        assert_eq!(happy.key_points.len(), 4);
    }
}
