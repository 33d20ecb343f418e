// the persona, the prompt layout, and every canned string the user can see

use crate::Lang;
use crate::core::GradeRecord;

/// Text the service produces itself, in one language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prompt {
    lang: Lang,
}

impl Prompt {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    /// Prompt sent to the model: persona, lookup summary, then the question.
    pub fn build(&self, summary: &str, message: &str) -> String {
        match self.lang {
            Lang::En => format!(
                "You are IfagHelper, the university assistant of IFAG.\n\
                 Information from the database:\n{summary}\n\n\
                 Student question: {message}\n\n\
                 Answer clearly and concisely, using the information above if relevant."
            ),
            Lang::Fr => format!(
                "Tu es IfagHelper, assistant universitaire de l'IFAG.\n\
                 Informations de la base de données:\n{summary}\n\n\
                 Question de l'étudiant: {message}\n\n\
                 Réponds de manière claire et concise en utilisant les informations ci-dessus si pertinentes."
            ),
        }
    }

    pub fn module_not_specified(&self) -> String {
        match self.lang {
            Lang::En => "The module is not specified.".to_string(),
            Lang::Fr => "Le module n'est pas précisé.".to_string(),
        }
    }

    pub fn no_grade(&self, module: &str) -> String {
        match self.lang {
            Lang::En => format!("No grade found for {module}."),
            Lang::Fr => format!("Aucune note trouvée pour {module}."),
        }
    }

    pub fn grade_found(&self, record: &GradeRecord) -> String {
        let module_name = &record.module_name;
        let grade = match record.grade {
            Some(grade) => format!("{grade}/20"),
            None => self.not_graded(),
        };
        let coefficient = match record.coefficient {
            Some(coefficient) => coefficient.to_string(),
            None => self.not_set(),
        };

        // f64 Display already drops the ".0" on whole numbers
        match self.lang {
            Lang::En => format!(
                "Grade found:\n- Module: {module_name}\n- Grade: {grade}\n- Coefficient: {coefficient}"
            ),
            Lang::Fr => format!(
                "Note trouvée :\n- Module : {module_name}\n- Note : {grade}\n- Coefficient : {coefficient}"
            ),
        }
    }

    fn not_graded(&self) -> String {
        match self.lang {
            Lang::En => "not graded yet".to_string(),
            Lang::Fr => "pas encore notée".to_string(),
        }
    }

    fn not_set(&self) -> String {
        match self.lang {
            Lang::En => "not set".to_string(),
            Lang::Fr => "non défini".to_string(),
        }
    }

    pub fn lookup_failed(&self) -> String {
        match self.lang {
            Lang::En => "Error retrieving the grade.".to_string(),
            Lang::Fr => "Erreur lors de la récupération de la note.".to_string(),
        }
    }

    pub fn unavailable(&self) -> String {
        match self.lang {
            Lang::En => "AI service temporarily unavailable.".to_string(),
            Lang::Fr => "Le service IA est temporairement indisponible.".to_string(),
        }
    }
}
