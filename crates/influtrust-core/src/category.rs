//! Content category vocabulary and the keyword dictionary that maps raw
//! hashtags, tags, and industry names onto it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("valid regex"));

/// Word tokens of `text` as the classifier sees them. Callers lowercase first.
pub fn keyword_tokens(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str())
}

fn is_single_token(keyword: &str) -> bool {
    TOKEN_RE
        .find(keyword)
        .is_some_and(|m| m.start() == 0 && m.end() == keyword.len())
}

/// Closed content taxonomy.
///
/// Declaration order is the canonical order; it breaks ties when ranking.
/// Serialized as the display label; English snake-case aliases are accepted
/// on input so YAML dictionaries stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Saúde", alias = "health")]
    Health,
    #[serde(rename = "Fitness", alias = "fitness")]
    Fitness,
    #[serde(rename = "Nutrição", alias = "nutrition")]
    Nutrition,
    #[serde(rename = "Saúde Mental", alias = "mental_health")]
    MentalHealth,
    #[serde(rename = "Bem-estar", alias = "wellness")]
    Wellness,
    #[serde(rename = "Medicina", alias = "medicine")]
    Medicine,
    #[serde(rename = "Beleza", alias = "beauty")]
    Beauty,
    #[serde(rename = "Culinária", alias = "food")]
    Food,
    #[serde(rename = "Esportes", alias = "sports")]
    Sports,
    #[serde(rename = "Tecnologia", alias = "technology")]
    Technology,
    #[serde(rename = "Negócios", alias = "business")]
    Business,
    #[serde(rename = "Educação", alias = "education")]
    Education,
    #[serde(rename = "Lifestyle", alias = "lifestyle")]
    Lifestyle,
    #[serde(rename = "Geral", alias = "general")]
    General,
}

impl Category {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Health => "Saúde",
            Category::Fitness => "Fitness",
            Category::Nutrition => "Nutrição",
            Category::MentalHealth => "Saúde Mental",
            Category::Wellness => "Bem-estar",
            Category::Medicine => "Medicina",
            Category::Beauty => "Beleza",
            Category::Food => "Culinária",
            Category::Sports => "Esportes",
            Category::Technology => "Tecnologia",
            Category::Business => "Negócios",
            Category::Education => "Educação",
            Category::Lifestyle => "Lifestyle",
            Category::General => "Geral",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A category with the number of keyword hits that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u32,
}

const DEFAULT_KEYWORDS: &[(&str, Category)] = &[
    // Health
    ("saude", Category::Health),
    ("saúde", Category::Health),
    ("health", Category::Health),
    ("healthy", Category::Health),
    ("saudavel", Category::Health),
    ("saudável", Category::Health),
    ("prevencao", Category::Health),
    ("prevenção", Category::Health),
    // Fitness
    ("fitness", Category::Fitness),
    ("treino", Category::Fitness),
    ("academia", Category::Fitness),
    ("workout", Category::Fitness),
    ("gym", Category::Fitness),
    ("musculacao", Category::Fitness),
    ("musculação", Category::Fitness),
    ("crossfit", Category::Fitness),
    ("exercicio", Category::Fitness),
    ("exercício", Category::Fitness),
    ("exercise", Category::Fitness),
    // Nutrition
    ("nutricao", Category::Nutrition),
    ("nutrição", Category::Nutrition),
    ("nutrition", Category::Nutrition),
    ("nutricionista", Category::Nutrition),
    ("dieta", Category::Nutrition),
    ("diet", Category::Nutrition),
    ("alimentacao", Category::Nutrition),
    ("alimentação", Category::Nutrition),
    ("proteina", Category::Nutrition),
    ("proteína", Category::Nutrition),
    ("suplementos", Category::Nutrition),
    ("vitaminas", Category::Nutrition),
    // Mental health
    ("saudemental", Category::MentalHealth),
    ("mentalhealth", Category::MentalHealth),
    ("ansiedade", Category::MentalHealth),
    ("anxiety", Category::MentalHealth),
    ("depressao", Category::MentalHealth),
    ("depressão", Category::MentalHealth),
    ("terapia", Category::MentalHealth),
    ("therapy", Category::MentalHealth),
    ("psicologia", Category::MentalHealth),
    // Wellness
    ("bemestar", Category::Wellness),
    ("wellness", Category::Wellness),
    ("meditacao", Category::Wellness),
    ("meditação", Category::Wellness),
    ("mindfulness", Category::Wellness),
    ("yoga", Category::Wellness),
    ("sono", Category::Wellness),
    ("sleep", Category::Wellness),
    ("autocuidado", Category::Wellness),
    ("selfcare", Category::Wellness),
    // Medicine
    ("medicina", Category::Medicine),
    ("medicine", Category::Medicine),
    ("medico", Category::Medicine),
    ("médico", Category::Medicine),
    ("medica", Category::Medicine),
    ("médica", Category::Medicine),
    ("doctor", Category::Medicine),
    ("clinica", Category::Medicine),
    ("clínica", Category::Medicine),
    ("vacina", Category::Medicine),
    ("vacinas", Category::Medicine),
    ("cardiologia", Category::Medicine),
    ("pediatria", Category::Medicine),
    // Beauty
    ("beleza", Category::Beauty),
    ("beauty", Category::Beauty),
    ("skincare", Category::Beauty),
    ("pele", Category::Beauty),
    ("maquiagem", Category::Beauty),
    ("makeup", Category::Beauty),
    ("cabelo", Category::Beauty),
    // Food
    ("culinaria", Category::Food),
    ("culinária", Category::Food),
    ("receita", Category::Food),
    ("receitas", Category::Food),
    ("recipe", Category::Food),
    ("food", Category::Food),
    ("cozinha", Category::Food),
    ("vegano", Category::Food),
    ("vegan", Category::Food),
    ("lowcarb", Category::Food),
    // Sports
    ("esporte", Category::Sports),
    ("esportes", Category::Sports),
    ("sports", Category::Sports),
    ("corrida", Category::Sports),
    ("running", Category::Sports),
    ("maratona", Category::Sports),
    ("futebol", Category::Sports),
    ("ciclismo", Category::Sports),
    // Technology
    ("tecnologia", Category::Technology),
    ("technology", Category::Technology),
    ("tech", Category::Technology),
    ("healthtech", Category::Technology),
    ("wearable", Category::Technology),
    ("wearables", Category::Technology),
    // Business
    ("negocios", Category::Business),
    ("negócios", Category::Business),
    ("business", Category::Business),
    ("empreendedorismo", Category::Business),
    ("startup", Category::Business),
    ("carreira", Category::Business),
    // Education
    ("educacao", Category::Education),
    ("educação", Category::Education),
    ("education", Category::Education),
    ("ciencia", Category::Education),
    ("ciência", Category::Education),
    ("science", Category::Education),
    ("pesquisa", Category::Education),
    ("research", Category::Education),
    // Lifestyle
    ("lifestyle", Category::Lifestyle),
    ("rotina", Category::Lifestyle),
    ("viagem", Category::Lifestyle),
    ("travel", Category::Lifestyle),
    ("moda", Category::Lifestyle),
    ("fashion", Category::Lifestyle),
    ("familia", Category::Lifestyle),
    ("família", Category::Lifestyle),
];

/// `YouTube` video category IDs (`snippet.categoryId`).
const DEFAULT_YOUTUBE_CATEGORY_IDS: &[(&str, Category)] = &[
    ("17", Category::Sports),
    ("19", Category::Lifestyle),
    ("22", Category::Lifestyle),
    ("26", Category::Beauty),
    ("27", Category::Education),
    ("28", Category::Technology),
];

/// Lowercase substrings of `LinkedIn` industry names.
const DEFAULT_INDUSTRIES: &[(&str, Category)] = &[
    ("health", Category::Health),
    ("hospital", Category::Medicine),
    ("medical", Category::Medicine),
    ("pharmaceutical", Category::Medicine),
    ("mental health", Category::MentalHealth),
    ("wellness", Category::Wellness),
    ("fitness", Category::Fitness),
    ("food", Category::Food),
    ("nutrition", Category::Nutrition),
    ("sports", Category::Sports),
    ("cosmetics", Category::Beauty),
    ("information technology", Category::Technology),
    ("software", Category::Technology),
    ("education", Category::Education),
    ("consulting", Category::Business),
];

/// Keyword → category mapping injected into the classifier.
///
/// All keys are stored lowercase. [`CategoryDictionary::default`] carries the
/// built-in health vocabulary; deployments can replace it with a YAML file
/// via [`load_category_dictionary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDictionary {
    #[serde(default)]
    pub keywords: BTreeMap<String, Category>,
    #[serde(default)]
    pub youtube_category_ids: BTreeMap<String, Category>,
    #[serde(default)]
    pub industries: BTreeMap<String, Category>,
}

impl Default for CategoryDictionary {
    fn default() -> Self {
        let collect = |pairs: &[(&str, Category)]| {
            pairs
                .iter()
                .map(|&(k, c)| (k.to_string(), c))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            keywords: collect(DEFAULT_KEYWORDS),
            youtube_category_ids: collect(DEFAULT_YOUTUBE_CATEGORY_IDS),
            industries: collect(DEFAULT_INDUSTRIES),
        }
    }
}

impl CategoryDictionary {
    /// Parse and validate a dictionary from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CategoriesFileParse`] on malformed YAML or an
    /// unknown category name, and [`ConfigError::Validation`] when the
    /// keyword table is empty or holds a key that is not a single word token
    /// (blank, or containing spaces or punctuation).
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: CategoryDictionary =
            serde_yaml::from_str(content).map_err(ConfigError::CategoriesFileParse)?;
        let dictionary = Self {
            keywords: lowercase_keys(raw.keywords),
            youtube_category_ids: raw
                .youtube_category_ids
                .into_iter()
                .map(|(k, c)| (k.trim().to_string(), c))
                .collect(),
            industries: lowercase_keys(raw.industries),
        };
        dictionary.validate()?;
        Ok(dictionary)
    }

    #[must_use]
    pub fn keyword(&self, token: &str) -> Option<Category> {
        self.keywords.get(token).copied()
    }

    #[must_use]
    pub fn youtube_category(&self, category_id: &str) -> Option<Category> {
        self.youtube_category_ids.get(category_id.trim()).copied()
    }

    /// Every industry entry whose key occurs in `industry` (case-insensitive).
    pub fn industry_matches<'a>(&'a self, industry: &str) -> impl Iterator<Item = Category> + 'a {
        let lower = industry.to_lowercase();
        self.industries
            .iter()
            .filter(move |(key, _)| lower.contains(key.as_str()))
            .map(|(_, category)| *category)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.keywords.is_empty() {
            return Err(ConfigError::Validation(
                "category dictionary must define at least one keyword".to_string(),
            ));
        }
        if let Some(bad) = self.keywords.keys().find(|k| !is_single_token(k)) {
            return Err(ConfigError::Validation(format!(
                "category keyword '{bad}' must be a single word (letters, digits or '_')"
            )));
        }
        Ok(())
    }
}

fn lowercase_keys(map: BTreeMap<String, Category>) -> BTreeMap<String, Category> {
    map.into_iter()
        .map(|(k, c)| (k.trim().trim_start_matches('#').to_lowercase(), c))
        .collect()
}

/// Load a category dictionary from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_category_dictionary(path: &Path) -> Result<CategoryDictionary, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    CategoryDictionary::from_yaml_str(&content)
}
