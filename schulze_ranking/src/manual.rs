/*!

This is the long-form manual for `schulze_ranking` and `courserank`.

## The ranking

Every voter gives a score to some of the subjects. A subject `A` is preferred to a
subject `B` by a voter if this voter gave a strictly higher score to `A` than to `B`.
Voters who did not score both subjects do not take part in that comparison, and
equal scores count for nobody.

The preference of `A` over `B` is the number of voters who prefer `A`, divided by the
number of voters who scored both subjects. If two subjects have no voter in common,
their preferences cannot be computed and the ranking fails. Use
`--raw-preferences` (or `"normalizePreferences": false`) to work with the raw counts
instead.

The strength of a path `A -> B -> C` is its weakest preference. The Schulze method
compares subjects by the strength of their strongest paths: `A` beats `B` if the
strongest path from `A` to `B` is stronger than the strongest path from `B` to `A`.

### `full` mode

This is the default. The winner is the subject that beats all the others. When
there is none (a cycle, for example `A` beats `B`, `B` beats `C` and `C` beats `A`), the
smallest group of subjects that beat everyone outside of the group is found, and
the subject of that group with the highest average score wins. Averages are rounded
to two decimals, and subjects with the same rounded average are taken in column order.

The winner is then removed from the scores, and the procedure starts again with the
remaining subjects until all of them are ranked. Because the winner is removed, the
preferences between the other subjects are recomputed every round.

### `simple` mode

The strongest paths are computed once. Subjects are sorted by the number of other
subjects they beat, then by average score. Cycles are not resolved: the subjects of a
cycle are ordered by their averages.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, for example the export of a Google Forms spreadsheet
* `excel` Excel (.xlsx) files

In both formats, the first row holds the names of the subjects. Every following row
is one voter. Empty cells mean that the voter did not score the subject.

```text
Marca temporal,Cálculo,Álgebra,Física
2024/01/10 10:00:00,8,7.5,
2024/01/10 10:05:00,6,"9,5",7
```

Decimal commas are accepted. Columns that are not subjects (like the timestamp
`Marca temporal` added by Google Forms) must be excluded with `--exclude` or
`excludedColumns`. By default, `Marca temporal` is excluded.

## Configuration

`courserank` accepts a configuration file in JSON:

```json
{
  "outputSettings": {
    "reportTitle": "Ranking de asignaturas",
    "outputPath": "README.md",
    "summaryPath": "summary.json"
  },
  "scoreSources": [
    {
      "provider": "csv",
      "filePath": "scores.csv",
      "excludedColumns": ["Marca temporal"]
    }
  ],
  "templates": {
    "beginning": "parts/beginning.md",
    "average": "parts/average.md",
    "ranking": "parts/ranking.md",
    "statistics": "parts/statistics.md"
  },
  "rules": {
    "rankingMode": "full",
    "normalizePreferences": true
  }
}
```

All the paths are relative to the directory of the configuration file.

FileSource options:
 - `provider` (`csv` or `excel`)
 - `filePath`
 - `excludedColumns` (array of strings, optional): the columns that are not subjects.
 - `excelWorksheetName` (string, optional): for Excel inputs, the name of the worksheet.
   Without it, the workbook must contain a single worksheet.
 - `firstScoreRowIndex` (number, optional, default 2): the first row that contains scores.
   The row just before is the header.

When several sources are given, their rows are concatenated and matched by column name.

Templates are Markdown fragments inserted before each section of the report. Every
template is optional.

 */
