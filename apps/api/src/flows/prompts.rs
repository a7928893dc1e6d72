// All LLM prompt constants for the tailoring and cover-letter flows.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume tailoring.
pub const TAILOR_RESUME_SYSTEM: &str = "You are an expert resume writer. \
    You tailor an existing resume to a specific job description, highlighting \
    the most relevant skills and experience without adding anything new.";

/// Resume section when the resume arrives as text.
pub const RESUME_TEXT_SECTION: &str = r#"RESUME:
{resume_text}"#;

/// Resume section when the resume arrives as an attached document.
pub const RESUME_DOCUMENT_SECTION: &str = "RESUME: provided as the attached document. \
Extract its full text content first, then work only from that extracted text.";

/// Tailoring prompt. Replace: {no_fabrication}, {resume_section}, {job_description}
pub const TAILOR_RESUME_PROMPT_TEMPLATE: &str = r#"{no_fabrication}

{resume_section}

JOB DESCRIPTION:
{job_description}

Rewrite the resume for this job:
1. Professional summary: rewrite it so it leads with the experience and strengths that matter most for this role.
2. Experience bullets: rewrite each bullet so it reads as situation, task, action and result, with the outcome stated plainly. Never name that structure or label the parts.
3. Skills: keep the skills that are relevant to the job description and drop the ones that are not. Only list a skill if the original resume already shows it.
4. Everything else: keep the original section order, headings, dates, employers and overall format.

Return a JSON object with this EXACT schema (no extra fields):
{
  "tailoredResume": "the complete tailored resume as plain text"
}"#;

/// System prompt for cover-letter generation.
pub const COVER_LETTER_SYSTEM: &str = "You are an expert career advisor. \
    You write compelling, specific cover letters that connect a candidate's \
    resume to the requirements of one job.";

/// Cover-letter prompt. Replace: {no_fabrication}, {tailored_resume}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"{no_fabrication}

TAILORED RESUME:
{tailored_resume}

JOB DESCRIPTION:
{job_description}

Write a cover letter with this structure:

SALUTATION
- "Dear <Hiring Manager Name>," when the job description names one.
- "Dear Hiring Manager at <Company Name>," when only the company is known.
- Otherwise "Dear Hiring Manager,".

INTRODUCTION (one paragraph)
- Name the exact position from the job description.
- Express genuine interest in the role and, when known, the company.

BODY (2-3 paragraphs)
- Pick the 2-3 qualifications or achievements from the resume that matter most for this role.
- For each, explain how it meets a specific requirement or responsibility in the job description.
- Refer to concrete outcomes from the resume bullets. Do not label them with any framework name.
- Use the job description's own keywords where they fit naturally.
- Expand on the most relevant points; do not simply restate the resume.

CONCLUSION (one paragraph)
- Restate interest, welcome the chance to discuss the role in an interview, and thank the reader.

CLOSING
- "Sincerely," followed by the candidate's name as it appears on the resume, or "[Candidate Name]" if the resume does not show one.

STYLE
- Professional, confident and specific. No clichés or filler; every sentence must earn its place.
- About 3-4 paragraphs in total, never longer than one page.

Return a JSON object with this EXACT schema (no extra fields):
{
  "coverLetter": "the complete cover letter as plain text, paragraphs separated by blank lines"
}"#;
