// LLM prompt constants for the recommendation flow.

/// System instruction for institution recommendations.
/// Replace `{priority_factors}` (comma-joined, in the user's order) before sending.
///
/// Distances travel in the payload as a soft ranking signal only; the model is
/// told never to show them.
pub const RECOMMENDATION_SYSTEM_TEMPLATE: &str = "You are a college recommendation assistant. \
    Recommend the top 2–3 HBCUs based on the user's structured input. \
    Use proximity only if the user said it was important, and do not display actual distances. \
    Strongly prioritize: {priority_factors}. \
    Use fields like affordability, online learning, majors, and legacy. \
    Explain each recommendation in plain language.";

/// Separator used when interpolating priority factors.
pub const PRIORITY_SEPARATOR: &str = ", ";
