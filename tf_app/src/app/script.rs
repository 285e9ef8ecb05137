use anyhow::{anyhow, Context};

/// One scripted editor interaction, replayed through pointer events
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// Drag stop to offset
    Drag { stop: usize, offset: f32 },
    /// Click stop and pick a color in the dialog
    Recolor { stop: usize, color: String },
    /// Click stop and dismiss the dialog
    Dismiss { stop: usize },
}

impl ScriptStep {
    /// `INDEX=OFFSET`
    pub fn parse_drag(s: &str) -> anyhow::Result<ScriptStep> {
        let (stop, value) = split_assignment(s)?;
        let offset = value
            .trim()
            .parse()
            .with_context(|| format!("invalid offset in '{s}'"))?;
        Ok(ScriptStep::Drag { stop, offset })
    }

    /// `INDEX=COLOR`
    pub fn parse_recolor(s: &str) -> anyhow::Result<ScriptStep> {
        let (stop, value) = split_assignment(s)?;
        Ok(ScriptStep::Recolor {
            stop,
            color: value.trim().to_owned(),
        })
    }

    /// `INDEX`
    pub fn parse_dismiss(s: &str) -> anyhow::Result<ScriptStep> {
        let stop = s
            .trim()
            .parse()
            .with_context(|| format!("invalid stop index '{s}'"))?;
        Ok(ScriptStep::Dismiss { stop })
    }
}

fn split_assignment(s: &str) -> anyhow::Result<(usize, &str)> {
    let (index, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected INDEX=VALUE, got '{s}'"))?;
    let index = index
        .trim()
        .parse()
        .with_context(|| format!("invalid stop index in '{s}'"))?;
    Ok((index, value))
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn parse_steps() {
        assert_eq!(
            ScriptStep::parse_drag("2=0.3").unwrap(),
            ScriptStep::Drag {
                stop: 2,
                offset: 0.3
            }
        );
        assert_eq!(
            ScriptStep::parse_recolor("0=rgb(1, 2, 3)").unwrap(),
            ScriptStep::Recolor {
                stop: 0,
                color: "rgb(1, 2, 3)".to_owned()
            }
        );
        assert_eq!(
            ScriptStep::parse_dismiss(" 4 ").unwrap(),
            ScriptStep::Dismiss { stop: 4 }
        );
    }

    #[test]
    fn malformed_steps() {
        assert!(ScriptStep::parse_drag("2").is_err());
        assert!(ScriptStep::parse_drag("x=0.5").is_err());
        assert!(ScriptStep::parse_drag("1=far").is_err());
        assert!(ScriptStep::parse_dismiss("-1").is_err());
    }
}
