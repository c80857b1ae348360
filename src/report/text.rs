use crate::report::{ReportContext, format_f64_6, render_aligned};

pub fn render_score_report(ctx: &ReportContext) -> String {
    let score = &ctx.score;
    let mut out = String::new();

    out.push_str(&format!(
        "The run control score is {}.\n",
        format_f64_6(score.score)
    ));
    out.push_str(&format!(
        "{} sample positions out of {} selected positions are present.\n",
        score.valid_sample_points, score.training_points
    ));
    if score.score < 1.0 {
        out.push_str("WARNING, run control score is below 1.\n");
    }

    out.push_str(
        "\nMean and standard deviation of mutation frequencies in the training dataset \
         followed by the mutation frequencies in the current sample.\n\n",
    );
    out.push_str(&render_aligned(&ctx.table));
    out
}
