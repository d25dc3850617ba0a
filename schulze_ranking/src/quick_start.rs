/*!

# Quick start with Google Forms

This example goes from a poll to a ranked report. It uses Google Forms because it is
free to use, but any tool that exports a spreadsheet works the same way.

We would like to know which courses students liked best. Create a new Form in Google
Drive, and add one **Linear scale** question per course, from 0 to 10. The title of
each question is the name of the course: it will be the name of the column in the
results.

Do not make the questions mandatory: students only score the courses they took.

**Getting the results** After the poll has ended, open the `Responses` tab and use the
`Create spreadsheet` option. In the spreadsheet, download the results with
`File > Download > Comma Separated Values (.csv)`.

The file should look like the following:

```text
Marca temporal,Cálculo,Álgebra,Física
2024/01/10 10:00:00,8,7,
2024/01/10 10:05:00,6,9,7
2024/01/10 10:09:00,,8,9
```

Run `courserank` with the following command (the name of the file may differ for you):

```bash
courserank -i 'Encuesta.csv' -o README.md
```

The first column is the timestamp added by Google Forms. It is ignored by default
(use `--exclude` for other columns that are not courses).

After running this command, you should see the progress of the ranking:

```text
[2024-01-11T09:55:59Z INFO  schulze_ranking] Processing 3 voters, subjects: ["Cálculo", "Álgebra", "Física"], rules: RankingRules { mode: Full, normalize_preferences: true }
[2024-01-11T09:55:59Z INFO  schulze_ranking] Tiebreak order: ["Álgebra", "Física", "Cálculo"]
[2024-01-11T09:55:59Z INFO  schulze_ranking] Round 1 -> Álgebra elected
[2024-01-11T09:55:59Z INFO  schulze_ranking] Round 2 -> Física elected
[2024-01-11T09:55:59Z INFO  schulze_ranking] Round 3 -> Cálculo elected
```

`README.md` now contains the averages, the ranking and the statistics of every course
as Markdown tables, ready to be published.

**Keeping track of the results** A summary in JSON can be written with `--summary`.
It contains the ranking and the details of every round. It can later serve as a
reference: with `--reference`, `courserank` checks that the new summary is the same
and prints the differences otherwise.

```bash
courserank -i 'Encuesta.csv' --summary summary.json
courserank -i 'Encuesta.csv' --reference summary.json
```

It is the end of this quick start. You can explore the following sections:
- the [manual](../manual/index.html) explains how the ranking works and how
  to write a configuration file with `--config`.

*/
