//! The fixed prompt field table
//!
//! Every editable prompt rule is one variant here, carrying its local
//! (camelCase, used for the JSON snapshot) key, its remote (snake_case,
//! used by the account store API) key, and its compiled-in default. Keeping
//! the mapping in one exhaustive table means a typo'd key cannot compile.

use std::fmt;
use std::str::FromStr;

use crate::rules;

/// One editable prompt rule field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PromptField {
    SystemPromptRules,
    UserGuidedPromptRules,
    RequirementReportRules,
    ThinkingPointsExtractionPrompt,
    ThinkingPointsSystemMessage,
    SystemPromptGenerationPrompt,
    SystemPromptSystemMessage,
    OptimizationAdvicePrompt,
    OptimizationAdviceSystemMessage,
    OptimizationApplicationPrompt,
    OptimizationApplicationSystemMessage,
    QualityAnalysisSystemPrompt,
    UserPromptQualityAnalysis,
    UserPromptQuickOptimization,
    UserPromptRules,
}

impl PromptField {
    /// Every field, in record order
    pub const ALL: [PromptField; 15] = [
        PromptField::SystemPromptRules,
        PromptField::UserGuidedPromptRules,
        PromptField::RequirementReportRules,
        PromptField::ThinkingPointsExtractionPrompt,
        PromptField::ThinkingPointsSystemMessage,
        PromptField::SystemPromptGenerationPrompt,
        PromptField::SystemPromptSystemMessage,
        PromptField::OptimizationAdvicePrompt,
        PromptField::OptimizationAdviceSystemMessage,
        PromptField::OptimizationApplicationPrompt,
        PromptField::OptimizationApplicationSystemMessage,
        PromptField::QualityAnalysisSystemPrompt,
        PromptField::UserPromptQualityAnalysis,
        PromptField::UserPromptQuickOptimization,
        PromptField::UserPromptRules,
    ];

    /// Key used in the local JSON snapshot
    pub fn local_key(self) -> &'static str {
        match self {
            PromptField::SystemPromptRules => "systemPromptRules",
            PromptField::UserGuidedPromptRules => "userGuidedPromptRules",
            PromptField::RequirementReportRules => "requirementReportRules",
            PromptField::ThinkingPointsExtractionPrompt => "thinkingPointsExtractionPrompt",
            PromptField::ThinkingPointsSystemMessage => "thinkingPointsSystemMessage",
            PromptField::SystemPromptGenerationPrompt => "systemPromptGenerationPrompt",
            PromptField::SystemPromptSystemMessage => "systemPromptSystemMessage",
            PromptField::OptimizationAdvicePrompt => "optimizationAdvicePrompt",
            PromptField::OptimizationAdviceSystemMessage => "optimizationAdviceSystemMessage",
            PromptField::OptimizationApplicationPrompt => "optimizationApplicationPrompt",
            PromptField::OptimizationApplicationSystemMessage => "optimizationApplicationSystemMessage",
            PromptField::QualityAnalysisSystemPrompt => "qualityAnalysisSystemPrompt",
            PromptField::UserPromptQualityAnalysis => "userPromptQualityAnalysis",
            PromptField::UserPromptQuickOptimization => "userPromptQuickOptimization",
            PromptField::UserPromptRules => "userPromptRules",
        }
    }

    /// Key used by the remote account store
    pub fn remote_key(self) -> &'static str {
        match self {
            PromptField::SystemPromptRules => "system_prompt_rules",
            PromptField::UserGuidedPromptRules => "user_guided_prompt_rules",
            PromptField::RequirementReportRules => "requirement_report_rules",
            PromptField::ThinkingPointsExtractionPrompt => "thinking_points_extraction_prompt",
            PromptField::ThinkingPointsSystemMessage => "thinking_points_system_message",
            PromptField::SystemPromptGenerationPrompt => "system_prompt_generation_prompt",
            PromptField::SystemPromptSystemMessage => "system_prompt_system_message",
            PromptField::OptimizationAdvicePrompt => "optimization_advice_prompt",
            PromptField::OptimizationAdviceSystemMessage => "optimization_advice_system_message",
            PromptField::OptimizationApplicationPrompt => "optimization_application_prompt",
            PromptField::OptimizationApplicationSystemMessage => "optimization_application_system_message",
            PromptField::QualityAnalysisSystemPrompt => "quality_analysis_system_prompt",
            PromptField::UserPromptQualityAnalysis => "user_prompt_quality_analysis",
            PromptField::UserPromptQuickOptimization => "user_prompt_quick_optimization",
            PromptField::UserPromptRules => "user_prompt_rules",
        }
    }

    /// Compiled-in default text, never empty
    pub fn default_text(self) -> &'static str {
        match self {
            PromptField::SystemPromptRules => rules::SYSTEM_PROMPT_RULES,
            PromptField::UserGuidedPromptRules => rules::USER_GUIDED_PROMPT_RULES,
            PromptField::RequirementReportRules => rules::REQUIREMENT_REPORT_RULES,
            PromptField::ThinkingPointsExtractionPrompt => rules::THINKING_POINTS_EXTRACTION_PROMPT,
            PromptField::ThinkingPointsSystemMessage => rules::THINKING_POINTS_SYSTEM_MESSAGE,
            PromptField::SystemPromptGenerationPrompt => rules::SYSTEM_PROMPT_GENERATION_PROMPT,
            PromptField::SystemPromptSystemMessage => rules::SYSTEM_PROMPT_SYSTEM_MESSAGE,
            PromptField::OptimizationAdvicePrompt => rules::OPTIMIZATION_ADVICE_PROMPT,
            PromptField::OptimizationAdviceSystemMessage => rules::OPTIMIZATION_ADVICE_SYSTEM_MESSAGE,
            PromptField::OptimizationApplicationPrompt => rules::OPTIMIZATION_APPLICATION_PROMPT,
            PromptField::OptimizationApplicationSystemMessage => rules::OPTIMIZATION_APPLICATION_SYSTEM_MESSAGE,
            PromptField::QualityAnalysisSystemPrompt => rules::QUALITY_ANALYSIS_SYSTEM_PROMPT,
            PromptField::UserPromptQualityAnalysis => rules::USER_PROMPT_QUALITY_ANALYSIS,
            PromptField::UserPromptQuickOptimization => rules::USER_PROMPT_QUICK_OPTIMIZATION,
            PromptField::UserPromptRules => rules::USER_PROMPT_RULES,
        }
    }

    /// Look a field up by its local snapshot key
    pub fn from_local_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.local_key() == key)
    }

    /// Look a field up by its remote key
    pub fn from_remote_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.remote_key() == key)
    }
}

impl fmt::Display for PromptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_key())
    }
}

impl FromStr for PromptField {
    type Err = String;

    /// Accepts either key spelling (CLI convenience)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptField::from_local_key(s)
            .or_else(|| PromptField::from_remote_key(s))
            .ok_or_else(|| {
                let known = PromptField::ALL.map(|f| f.local_key()).join(", ");
                format!("Unknown prompt field '{}'. Known fields: {}", s, known)
            })
    }
}
